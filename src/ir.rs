use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ROOT: &str = "start";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Question,
    Outcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub value: String,
    pub next: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub answers: Vec<Answer>,
}

/// The authored quiz: questions keyed by id, in authoring order.
///
/// Any answer target that is not a key of `questions` is an outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionTable {
    pub root: String,
    pub questions: IndexMap<String, Question>,
}

impl QuestionTable {
    pub fn new() -> Self {
        Self {
            root: DEFAULT_ROOT.to_string(),
            questions: IndexMap::new(),
        }
    }

    pub fn with_root(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            questions: IndexMap::new(),
        }
    }

    /// Inserts a question, or replaces the prompt of an existing one.
    pub fn ensure_question(&mut self, id: &str, text: &str) -> &mut Question {
        let entry = self.questions.entry(id.to_string()).or_insert(Question {
            id: id.to_string(),
            text: id.to_string(),
            answers: Vec::new(),
        });
        entry.text = text.to_string();
        entry
    }

    pub fn add_answer(&mut self, question: &str, value: &str, next: &str) {
        if let Some(q) = self.questions.get_mut(question) {
            q.answers.push(Answer {
                value: value.to_string(),
                next: next.to_string(),
            });
        }
    }

    pub fn is_question(&self, id: &str) -> bool {
        self.questions.contains_key(id)
    }

    pub fn kind_of(&self, id: &str) -> NodeKind {
        if self.is_question(id) {
            NodeKind::Question
        } else {
            NodeKind::Outcome
        }
    }

    /// Display text for any node id: the prompt for questions, the id itself
    /// for outcomes.
    pub fn text_of<'a>(&'a self, id: &'a str) -> &'a str {
        self.questions
            .get(id)
            .map(|q| q.text.as_str())
            .unwrap_or(id)
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

impl Default for QuestionTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcomes_are_anything_not_keyed() {
        let mut table = QuestionTable::new();
        table.ensure_question("start", "Pick one");
        table.add_answer("start", "yes", "Done");
        assert_eq!(table.kind_of("start"), NodeKind::Question);
        assert_eq!(table.kind_of("Done"), NodeKind::Outcome);
        assert_eq!(table.text_of("Done"), "Done");
        assert_eq!(table.text_of("start"), "Pick one");
    }

    #[test]
    fn ensure_question_keeps_insertion_order() {
        let mut table = QuestionTable::new();
        table.ensure_question("b", "B");
        table.ensure_question("a", "A");
        table.ensure_question("b", "B again");
        let ids: Vec<&str> = table.questions.keys().map(String::as_str).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(table.text_of("b"), "B again");
    }
}
