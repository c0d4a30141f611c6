//! Fixed catalogue of maintenance commands.
//!
//! Every entry maps a (category, choice key) pair to a complete shell command
//! line. Missing tools are handled inside the command text itself.

use crate::model::{Category, CategoryInfo, CommandEntry, Lookup, CANCEL_KEY};

const FLATPAK_UPDATE: &str = "if command -v flatpak >/dev/null 2>&1; then flatpak update; \
else echo 'Flatpak is not installed.'; fi";

const BASIC_INFO: &str = "if command -v neofetch >/dev/null 2>&1; then neofetch; \
else echo 'neofetch is missing'; echo; uname -a; echo; \
lsb_release -a 2>/dev/null || cat /etc/os-release; fi";

const APT_REPAIR: &str = "echo 'Repairing APT locks...' ; \
sudo rm -f /var/lib/dpkg/lock* /var/lib/apt/lists/lock /var/cache/apt/archives/lock ; \
sudo dpkg --configure -a ; sudo apt install -f ; \
echo ; echo 'Done.'";

const DISK_USAGE: &str = "echo 'Disk usage (df -h):'; df -h | sort -k6";

const NVIDIA_CHECK: &str = "echo 'Checking NVIDIA driver status...'; \
if command -v nvidia-smi >/dev/null 2>&1; then \
  nvidia-smi; \
else \
  echo 'nvidia-smi not available. Checking lspci:'; \
  echo; lspci | grep -i nvidia || echo 'No NVIDIA device in lspci output.'; \
fi";

const APT_HISTORY: &str = "echo 'Latest APT updates (/var/log/apt/history.log):'; \
echo; sudo tail -n 200 /var/log/apt/history.log || echo 'Could not read history.log.'";

const GNOME_SOFTWARE: &str = "if command -v gnome-software >/dev/null 2>&1; then \
  echo 'Opening GNOME Software...'; \
  gnome-software & \
else \
  echo 'GNOME Software is not installed on this system.'; \
fi";

const SYSINFO_REPORT: &str = "echo 'System information (hostnamectl):'; \
hostnamectl || echo 'hostnamectl not available'; \
echo; echo 'Block devices (lsblk):'; lsblk; \
echo; echo 'Memory usage (free -h):'; free -h; \
echo; echo 'Disk usage (df -h):'; df -h | sort -k6";

const AUDIO_RESTART: &str = "echo 'Restarting PipeWire/audio services...' ; \
systemctl --user restart pipewire.service pipewire-pulse.service wireplumber.service 2>/dev/null || true ; \
echo ; echo 'Done.'";

const ICON_CACHE: &str = "echo 'Rebuilding icon caches...' ; \
gtk-update-icon-cache -f /usr/share/icons/* 2>/dev/null || true ; \
sudo update-icon-caches /usr/share/icons/* 2>/dev/null || true ; \
echo ; echo 'Done.'";

const CODECS: &str = "sudo apt install -y \
gstreamer1.0-libav \
gstreamer1.0-plugins-good \
gstreamer1.0-plugins-bad \
gstreamer1.0-plugins-ugly \
ffmpeg libdvd-pkg \
&& sudo dpkg-reconfigure libdvd-pkg";

const fn entry(
    category: Category,
    key: &'static str,
    label: &'static str,
    template: &'static str,
) -> CommandEntry {
    CommandEntry {
        category,
        key,
        label,
        template,
    }
}

/// Entries in category order, then dialog order.
static ENTRIES: &[CommandEntry] = &[
    entry(
        Category::System,
        "update",
        "Update system (APT)",
        "sudo apt update && sudo apt full-upgrade",
    ),
    entry(
        Category::System,
        "clean",
        "Clean up system",
        "sudo apt autoremove -y && sudo apt autoclean -y",
    ),
    entry(
        Category::System,
        "flatpak-update",
        "Update Flatpak applications",
        FLATPAK_UPDATE,
    ),
    entry(Category::System, "info-basic", "System information (basic)", BASIC_INFO),
    entry(Category::System, "fix", "Repair APT locks / installs", APT_REPAIR),
    entry(Category::Status, "mem", "Show memory usage (free -h)", "free -h"),
    entry(Category::Status, "disk", "Show disk usage (df -h)", DISK_USAGE),
    entry(Category::Status, "nvidia", "Check NVIDIA driver", NVIDIA_CHECK),
    entry(Category::Status, "aptlog", "Show update log (APT history)", APT_HISTORY),
    entry(Category::Status, "gsoft", "Open GNOME Software", GNOME_SOFTWARE),
    entry(Category::Status, "sysinfo", "Extended system report", SYSINFO_REPORT),
    entry(Category::Fix, "bt", "Fix Bluetooth / audio (PipeWire)", AUDIO_RESTART),
    entry(Category::Fix, "icons", "Fix icons and GTK themes", ICON_CACHE),
    entry(Category::Fix, "apt", "Repair APT locks / installs", APT_REPAIR),
    entry(
        Category::Browsers,
        "brave",
        "Brave browser",
        "sudo apt install -y brave-browser",
    ),
    entry(
        Category::Browsers,
        "chromium",
        "Chromium browser",
        "sudo apt install -y chromium",
    ),
    entry(
        Category::Multimedia,
        "vlc",
        "VLC media player",
        "sudo apt install -y vlc",
    ),
    entry(
        Category::Multimedia,
        "mpv",
        "MPV media player",
        "sudo apt install -y mpv",
    ),
    entry(
        Category::Multimedia,
        "codecs",
        "Multimedia codecs (full set)",
        CODECS,
    ),
    entry(
        Category::Graphics,
        "gimp",
        "GIMP image editor",
        "sudo apt install -y gimp",
    ),
    entry(
        Category::Graphics,
        "gthumb",
        "gThumb image viewer",
        "sudo apt install -y gthumb",
    ),
    entry(
        Category::Graphics,
        "flameshot",
        "Flameshot screenshot tool",
        "sudo apt install -y flameshot",
    ),
    entry(
        Category::Tools,
        "timeshift",
        "Timeshift",
        "sudo apt install -y timeshift",
    ),
    entry(
        Category::Tools,
        "gparted",
        "GParted",
        "sudo apt install -y gparted",
    ),
    entry(Category::Tools, "htop", "htop", "sudo apt install -y htop"),
];

/// Label of the dismiss option appended to every choice list.
pub const CANCEL_LABEL: &str = "Cancel";

/// Every entry of the catalogue.
pub fn all() -> &'static [CommandEntry] {
    ENTRIES
}

/// Entries of one category, in the order a dialog offers them.
pub fn entries(category: Category) -> impl Iterator<Item = &'static CommandEntry> {
    ENTRIES.iter().filter(move |e| e.category == category)
}

/// Resolve a choice key. Unknown keys and the cancel sentinel both cancel.
pub fn lookup(category: Category, key: &str) -> Lookup {
    if key == CANCEL_KEY {
        return Lookup::Cancelled;
    }
    entries(category)
        .find(|e| e.key == key)
        .map(Lookup::Found)
        .unwrap_or(Lookup::Cancelled)
}

/// `(key, label)` options for a choose-one dialog, ending with cancel.
pub fn choices(category: Category) -> Vec<(&'static str, &'static str)> {
    entries(category)
        .map(|e| (e.key, e.label))
        .chain(std::iter::once((CANCEL_KEY, CANCEL_LABEL)))
        .collect()
}

pub fn info(category: Category) -> CategoryInfo {
    match category {
        Category::System => CategoryInfo {
            heading: "System",
            prompt: "Choose a maintenance task:",
            cancel_message: "System task cancelled.",
        },
        Category::Status => CategoryInfo {
            heading: "System information (extended)",
            prompt: "Choose a check or tool:",
            cancel_message: "System information (extended) cancelled.",
        },
        Category::Fix => CategoryInfo {
            heading: "System repair",
            prompt: "Choose what to repair:",
            cancel_message: "System repair cancelled.",
        },
        Category::Browsers => CategoryInfo {
            heading: "Browsers",
            prompt: "Choose a browser:",
            cancel_message: "Browser installation cancelled.",
        },
        Category::Multimedia => CategoryInfo {
            heading: "Multimedia",
            prompt: "Choose a program:",
            cancel_message: "Multimedia installation cancelled.",
        },
        Category::Graphics => CategoryInfo {
            heading: "Graphics",
            prompt: "Choose a program:",
            cancel_message: "Graphics program installation cancelled.",
        },
        Category::Tools => CategoryInfo {
            heading: "Tools",
            prompt: "Choose a tool:",
            cancel_message: "Tool installation cancelled.",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn template(category: Category, key: &str) -> &'static str {
        match lookup(category, key) {
            Lookup::Found(e) => e.template,
            Lookup::Cancelled => panic!("{category}/{key} should resolve"),
        }
    }

    #[test]
    fn every_listed_choice_resolves() {
        let expected: &[(Category, &[&str])] = &[
            (
                Category::System,
                &["update", "clean", "flatpak-update", "info-basic", "fix"],
            ),
            (
                Category::Status,
                &["mem", "disk", "nvidia", "aptlog", "gsoft", "sysinfo"],
            ),
            (Category::Fix, &["bt", "icons", "apt"]),
            (Category::Browsers, &["brave", "chromium"]),
            (Category::Multimedia, &["vlc", "mpv", "codecs"]),
            (Category::Graphics, &["gimp", "gthumb", "flameshot"]),
            (Category::Tools, &["timeshift", "gparted", "htop"]),
        ];
        for (category, keys) in expected {
            let found: Vec<&str> = entries(*category).map(|e| e.key).collect();
            assert_eq!(found.as_slice(), *keys, "choices of {category}");
        }
        assert_eq!(all().len(), 25);
    }

    #[test]
    fn keys_are_unique_within_a_category() {
        for category in Category::ALL {
            let mut seen = HashSet::new();
            for e in entries(category) {
                assert!(seen.insert(e.key), "duplicate key {category}/{}", e.key);
                assert_ne!(e.key, CANCEL_KEY);
                assert!(!e.template.trim().is_empty());
            }
        }
    }

    #[test]
    fn exact_templates() {
        assert_eq!(
            template(Category::System, "update"),
            "sudo apt update && sudo apt full-upgrade"
        );
        assert_eq!(
            template(Category::System, "clean"),
            "sudo apt autoremove -y && sudo apt autoclean -y"
        );
        assert_eq!(template(Category::Status, "mem"), "free -h");
        assert_eq!(
            template(Category::Status, "disk"),
            "echo 'Disk usage (df -h):'; df -h | sort -k6"
        );
        assert_eq!(
            template(Category::Browsers, "brave"),
            "sudo apt install -y brave-browser"
        );
        assert_eq!(
            template(Category::Browsers, "chromium"),
            "sudo apt install -y chromium"
        );
        assert_eq!(template(Category::Multimedia, "vlc"), "sudo apt install -y vlc");
        assert_eq!(template(Category::Multimedia, "mpv"), "sudo apt install -y mpv");
        assert_eq!(template(Category::Graphics, "gimp"), "sudo apt install -y gimp");
        assert_eq!(
            template(Category::Graphics, "gthumb"),
            "sudo apt install -y gthumb"
        );
        assert_eq!(
            template(Category::Graphics, "flameshot"),
            "sudo apt install -y flameshot"
        );
        assert_eq!(
            template(Category::Tools, "timeshift"),
            "sudo apt install -y timeshift"
        );
        assert_eq!(
            template(Category::Tools, "gparted"),
            "sudo apt install -y gparted"
        );
        assert_eq!(template(Category::Tools, "htop"), "sudo apt install -y htop");
    }

    #[test]
    fn codecs_install_package_list_then_reconfigure() {
        let t = template(Category::Multimedia, "codecs");
        let packages = "gstreamer1.0-libav gstreamer1.0-plugins-good gstreamer1.0-plugins-bad \
gstreamer1.0-plugins-ugly ffmpeg libdvd-pkg";
        let install = t.find(packages).expect("package list present");
        let reconfigure = t
            .find("sudo dpkg-reconfigure libdvd-pkg")
            .expect("reconfigure present");
        assert!(install < reconfigure);
        assert!(t.starts_with("sudo apt install -y "));
    }

    #[test]
    fn shell_fallbacks_live_in_templates() {
        assert!(template(Category::Status, "nvidia").contains("command -v nvidia-smi"));
        assert!(template(Category::Status, "nvidia").contains("lspci | grep -i nvidia"));
        assert!(template(Category::Status, "aptlog")
            .contains("tail -n 200 /var/log/apt/history.log"));
        assert!(template(Category::Status, "gsoft").contains("gnome-software &"));
        assert!(template(Category::System, "flatpak-update").contains("flatpak update"));
        assert!(template(Category::System, "info-basic").contains("/etc/os-release"));
        assert!(template(Category::Fix, "bt").contains("wireplumber.service"));
        assert!(template(Category::Fix, "icons").contains("gtk-update-icon-cache"));
    }

    #[test]
    fn system_fix_matches_apt_repair() {
        let t = template(Category::System, "fix");
        assert_eq!(t, template(Category::Fix, "apt"));
        assert!(t.contains("sudo dpkg --configure -a"));
        assert!(t.contains("/var/lib/dpkg/lock*"));
    }

    #[test]
    fn sysinfo_report_combines_tools() {
        let t = template(Category::Status, "sysinfo");
        for part in ["hostnamectl", "lsblk", "free -h", "df -h | sort -k6"] {
            assert!(t.contains(part), "missing {part}");
        }
    }

    #[test]
    fn cancel_and_unknown_keys_cancel() {
        assert_eq!(lookup(Category::Browsers, "cancel"), Lookup::Cancelled);
        assert_eq!(lookup(Category::Browsers, "firefox"), Lookup::Cancelled);
        assert_eq!(lookup(Category::Browsers, ""), Lookup::Cancelled);
        // keys are scoped to their category
        assert_eq!(lookup(Category::Tools, "vlc"), Lookup::Cancelled);
    }

    #[test]
    fn choices_end_with_cancel() {
        let options = choices(Category::Graphics);
        assert_eq!(
            options.iter().map(|(k, _)| *k).collect::<Vec<_>>(),
            vec!["gimp", "gthumb", "flameshot", "cancel"]
        );
        assert_eq!(options.last(), Some(&(CANCEL_KEY, CANCEL_LABEL)));
    }

    #[test]
    fn install_categories_mention_installation_when_cancelled() {
        for category in [
            Category::Browsers,
            Category::Multimedia,
            Category::Graphics,
            Category::Tools,
        ] {
            assert!(info(category).cancel_message.contains("installation cancelled"));
        }
    }
}
