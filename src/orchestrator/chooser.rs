use crate::model::CANCEL_KEY;

/// Map a dialog response to a choice key.
///
/// `response` is the index of the picked option; `None` means the dialog was
/// dismissed. Dismissal and out-of-range indices yield the cancel sentinel.
pub(crate) fn choose_one<'a>(options: &[(&'a str, &str)], response: Option<usize>) -> &'a str {
    response
        .and_then(|i| options.get(i))
        .map(|(key, _)| *key)
        .unwrap_or(CANCEL_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue;
    use crate::model::Category;

    #[test]
    fn picks_the_indexed_key() {
        let options = catalogue::choices(Category::Multimedia);
        assert_eq!(choose_one(&options, Some(0)), "vlc");
        assert_eq!(choose_one(&options, Some(2)), "codecs");
    }

    #[test]
    fn dismissal_and_bad_index_cancel() {
        let options = catalogue::choices(Category::Tools);
        assert_eq!(choose_one(&options, None), CANCEL_KEY);
        assert_eq!(choose_one(&options, Some(options.len())), CANCEL_KEY);
        assert_eq!(choose_one(&[], Some(0)), CANCEL_KEY);
    }

    #[test]
    fn explicit_cancel_option_cancels() {
        let options = catalogue::choices(Category::Browsers);
        assert_eq!(choose_one(&options, Some(options.len() - 1)), CANCEL_KEY);
    }
}
