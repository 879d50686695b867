/// Single-line text buffer with a placeholder and a character limit.
///
/// Content placed by the program (a pre-filled value, a revisited wizard
/// stage) starts out selected: the next typed character replaces it, while
/// backspace keeps it for editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    placeholder: &'static str,
    limit: usize,
    selected: bool,
}

impl TextInput {
    pub fn new(placeholder: &'static str, limit: usize) -> Self {
        Self {
            value: String::new(),
            placeholder,
            limit,
            selected: false,
        }
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.set(value);
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn placeholder(&self) -> &'static str {
        self.placeholder
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Select the current content, if any.
    pub fn select(&mut self) {
        self.selected = !self.value.is_empty();
    }

    /// Append `ch` unless the buffer is full or `ch` is a control character.
    /// Selected content is replaced.
    pub fn push(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        if self.selected {
            self.value.clear();
            self.selected = false;
        }
        if self.value.chars().count() >= self.limit {
            return false;
        }
        self.value.push(ch);
        true
    }

    pub fn pop(&mut self) -> Option<char> {
        self.selected = false;
        self.value.pop()
    }

    /// Replace the content, truncated to the limit, and select it.
    pub fn set(&mut self, value: &str) {
        self.value = value.chars().take(self.limit).collect();
        self.select();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.selected = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_counts_characters() {
        let mut input = TextInput::new("Choose an option", 3);
        assert!(input.push('é'));
        assert!(input.push('a'));
        assert!(input.push('b'));
        assert!(!input.push('c'));
        assert_eq!(input.value(), "éab");
    }

    #[test]
    fn control_characters_are_ignored() {
        let mut input = TextInput::new("", 8);
        assert!(!input.push('\n'));
        assert!(input.is_empty());
    }

    #[test]
    fn set_truncates_and_selects() {
        let mut input = TextInput::new("", 4).with_value("abcdef");
        assert_eq!(input.value(), "abcd");
        assert!(input.is_selected());
        assert_eq!(input.pop(), Some('d'));
        assert!(!input.is_selected());
        assert!(input.push('x'));
        assert_eq!(input.value(), "abcx");
    }

    #[test]
    fn typing_replaces_selected_content() {
        let mut input = TextInput::new("", 16).with_value("Bill");
        assert!(input.push('/'));
        assert_eq!(input.value(), "/");
        assert!(!input.is_selected());

        // Full buffers still accept a replacement.
        let mut full = TextInput::new("", 2).with_value("ab");
        assert!(full.push('c'));
        assert_eq!(full.value(), "c");

        let mut blank = TextInput::new("", 4).with_value("");
        assert!(!blank.is_selected());
        blank.select();
        assert!(!blank.is_selected());
    }
}
