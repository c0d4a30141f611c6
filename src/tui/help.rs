use ratatui::{
    layout::Rect,
    style::Color,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

fn key_line(keys: &'static str, pad: usize, what: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::raw("  "),
        Span::styled(keys, Style::default().fg(Color::Magenta)),
        Span::raw(" ".repeat(pad)),
        Span::raw(what),
    ])
}

pub fn draw_help(area: Rect, f: &mut Frame) {
    let p = Paragraph::new(vec![
        Line::from("Keybinds:"),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("q", Style::default().fg(Color::Magenta)),
            Span::raw(" / "),
            Span::styled("Ctrl-C", Style::default().fg(Color::Magenta)),
            Span::raw("  Quit"),
        ]),
        key_line("tab", 9, "Next view (shift-tab: previous)"),
        key_line("1 2 3", 7, "Tools / Install / System monitor"),
        key_line("↑/↓", 9, "Move (also j/k)"),
        key_line("enter", 7, "Run the highlighted action"),
        key_line("y", 11, "Copy last command to clipboard"),
        key_line("s", 11, "Save log to a text file"),
        key_line("?", 11, "Show this help"),
        Line::from(""),
        Line::from("Choice dialogs:"),
        key_line("↑/↓", 9, "Move (also j/k)"),
        key_line("1-9", 9, "Pick an option directly"),
        key_line("enter", 7, "Confirm"),
        key_line("esc", 9, "Cancel"),
        Line::from(""),
        Line::from("Commands open in a separate terminal window, which"),
        Line::from("waits for Enter before it closes."),
    ])
    .block(Block::default().borders(Borders::ALL).title("Help"));
    f.render_widget(Clear, area);
    f.render_widget(p, area);
}
