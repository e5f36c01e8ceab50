use std::collections::HashMap;

/// Current value of one field. An absent answer is simply not in [`Answers`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Text(String),
    List(Vec<String>),
    Number(i64),
    Flag(bool),
}

impl Answer {
    /// Whether the answer counts as given: non-empty list, non-blank text,
    /// any number, or a `true` flag.
    pub fn is_filled(&self) -> bool {
        match self {
            Answer::Text(s) => !s.trim().is_empty(),
            Answer::List(items) => !items.is_empty(),
            Answer::Number(_) => true,
            Answer::Flag(b) => *b,
        }
    }
}

/// Field id -> answer map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answers(HashMap<&'static str, Answer>);

impl Answers {
    pub fn get(&self, id: &str) -> Option<&Answer> {
        self.0.get(id)
    }

    pub fn set(&mut self, id: &'static str, answer: Answer) {
        self.0.insert(id, answer);
    }

    pub fn clear(&mut self, id: &str) {
        self.0.remove(id);
    }

    pub fn is_filled(&self, id: &str) -> bool {
        self.get(id).is_some_and(Answer::is_filled)
    }

    /// Text value, or `""` when absent or not text.
    pub fn text(&self, id: &str) -> &str {
        match self.get(id) {
            Some(Answer::Text(s)) => s,
            _ => "",
        }
    }

    /// List value, or an empty slice when absent or not a list.
    pub fn list(&self, id: &str) -> &[String] {
        match self.get(id) {
            Some(Answer::List(items)) => items,
            _ => &[],
        }
    }

    pub fn number(&self, id: &str) -> Option<i64> {
        match self.get(id) {
            Some(Answer::Number(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn flag(&self, id: &str) -> bool {
        matches!(self.get(id), Some(Answer::Flag(true)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_predicate_per_kind() {
        assert!(!Answer::Text("   ".into()).is_filled());
        assert!(Answer::Text(" Cotonou ".into()).is_filled());
        assert!(!Answer::List(vec![]).is_filled());
        assert!(Answer::List(vec!["Dîner".into()]).is_filled());
        assert!(Answer::Number(0).is_filled());
        assert!(!Answer::Flag(false).is_filled());
        assert!(Answer::Flag(true).is_filled());
    }

    #[test]
    fn test_typed_accessors_default_when_absent() {
        let mut answers = Answers::default();
        assert_eq!(answers.text("ville"), "");
        assert!(answers.list("typesRepas").is_empty());
        assert_eq!(answers.number("satisfactionAccesRepas"), None);
        assert!(!answers.flag("acceptePolitique"));

        answers.set("satisfactionAccesRepas", Answer::Number(4));
        assert_eq!(answers.number("satisfactionAccesRepas"), Some(4));
        assert!(answers.is_filled("satisfactionAccesRepas"));

        answers.clear("satisfactionAccesRepas");
        assert!(!answers.is_filled("satisfactionAccesRepas"));
    }
}
