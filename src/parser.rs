use crate::ir::{Answer, DEFAULT_ROOT, Question, QuestionTable};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

static ROOT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^root\s+(\S+)\s*$").unwrap());
static QUESTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<id>[A-Za-z0-9_.\-]+)\s*:\s*(?P<text>.*)$").unwrap());
static ANSWER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<label>.+?)\s*->\s*(?P<next>.+)$").unwrap());

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid question table: {0}")]
    Json(String),
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },
    #[error("duplicate question id `{0}`")]
    DuplicateQuestion(String),
    #[error("question `{0}` has no answers")]
    NoAnswers(String),
    #[error("empty identifier in {0}")]
    EmptyIdentifier(String),
}

#[derive(Debug, Deserialize)]
struct QuestionFile {
    #[serde(default)]
    id: Option<String>,
    text: String,
    #[serde(default)]
    answers: Vec<Answer>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TableFile {
    Wrapped {
        #[serde(default)]
        root: Option<String>,
        questions: IndexMap<String, QuestionFile>,
    },
    Flat(IndexMap<String, QuestionFile>),
}

/// Parses a question table from JSON/JSON5 or the indented outline format.
pub fn parse_question_table(input: &str) -> Result<QuestionTable, ParseError> {
    let table = if skip_json5_trivia(input).starts_with('{') {
        parse_json_table(input)?
    } else {
        parse_outline(input)?
    };
    validate(&table)?;
    tracing::debug!(
        questions = table.questions.len(),
        root = %table.root,
        "parsed question table"
    );
    Ok(table)
}

/// Strips leading whitespace and JSON5 `//` / `/* */` comments.
fn skip_json5_trivia(input: &str) -> &str {
    let mut rest = input.trim_start();
    loop {
        if let Some(after) = rest.strip_prefix("//") {
            rest = after.find('\n').map_or("", |end| &after[end..]).trim_start();
        } else if let Some(after) = rest.strip_prefix("/*") {
            let Some(end) = after.find("*/") else {
                return rest;
            };
            rest = after[end + 2..].trim_start();
        } else {
            return rest;
        }
    }
}

fn parse_json_table(input: &str) -> Result<QuestionTable, ParseError> {
    let parsed: TableFile =
        json5::from_str(input).map_err(|err| ParseError::Json(err.to_string()))?;
    let (root, entries) = match parsed {
        TableFile::Wrapped { root, questions } => (root, questions),
        TableFile::Flat(questions) => (None, questions),
    };

    let mut table = QuestionTable::with_root(root.unwrap_or_else(|| DEFAULT_ROOT.to_string()));
    for (key, entry) in entries {
        if let Some(id) = entry.id.as_deref() {
            if id != key {
                tracing::warn!(key = %key, id, "question id differs from its key, using the key");
            }
        }
        table.questions.insert(
            key.clone(),
            Question {
                id: key,
                text: entry.text,
                answers: entry.answers,
            },
        );
    }
    Ok(table)
}

fn parse_outline(input: &str) -> Result<QuestionTable, ParseError> {
    let mut table = QuestionTable::new();
    let mut current: Option<String> = None;

    for (idx, raw_line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = raw_line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("%%") {
            continue;
        }
        let indented = raw_line.starts_with(' ') || raw_line.starts_with('\t');

        if !indented {
            if let Some(caps) = ROOT_RE.captures(trimmed) {
                table.root = caps[1].to_string();
                continue;
            }
            let Some(caps) = QUESTION_RE.captures(trimmed) else {
                return Err(ParseError::Syntax {
                    line: line_no,
                    message: format!("expected `id: prompt`, found `{trimmed}`"),
                });
            };
            let id = caps["id"].to_string();
            if table.is_question(&id) {
                return Err(ParseError::DuplicateQuestion(id));
            }
            table.ensure_question(&id, caps["text"].trim());
            current = Some(id);
            continue;
        }

        let Some(question) = current.as_deref() else {
            return Err(ParseError::Syntax {
                line: line_no,
                message: "answer appears before any question".to_string(),
            });
        };
        let Some(caps) = ANSWER_RE.captures(trimmed) else {
            return Err(ParseError::Syntax {
                line: line_no,
                message: format!("expected `label -> next`, found `{trimmed}`"),
            });
        };
        table.add_answer(question, caps["label"].trim(), caps["next"].trim());
    }

    Ok(table)
}

fn validate(table: &QuestionTable) -> Result<(), ParseError> {
    if table.root.trim().is_empty() {
        return Err(ParseError::EmptyIdentifier("root".to_string()));
    }
    for question in table.questions.values() {
        if question.id.trim().is_empty() {
            return Err(ParseError::EmptyIdentifier("question key".to_string()));
        }
        if question.answers.is_empty() {
            return Err(ParseError::NoAnswers(question.id.clone()));
        }
        for answer in &question.answers {
            if answer.next.trim().is_empty() {
                return Err(ParseError::EmptyIdentifier(format!(
                    "answer `{}` of `{}`",
                    answer.value, question.id
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_outline_with_root_and_comments() {
        let input = "\
# quiz
root begin
begin: Do you like tea?
  yes -> Tea drinker
  no -> coffee

coffee: Coffee then?
  yes -> Coffee drinker
  no -> Tea drinker
";
        let table = parse_question_table(input).unwrap();
        assert_eq!(table.root, "begin");
        assert_eq!(table.questions.len(), 2);
        let begin = &table.questions["begin"];
        assert_eq!(begin.text, "Do you like tea?");
        assert_eq!(begin.answers[0].next, "Tea drinker");
        assert_eq!(begin.answers[1].value, "no");
        assert!(!table.is_question("Tea drinker"));
    }

    #[test]
    fn parses_wrapped_json5() {
        let input = r#"{
            root: "q1",
            questions: {
                q1: { text: "First?", answers: [{ value: "a", next: "q2" }, { value: "b", next: "End" }] },
                q2: { id: "q2", text: "Second?", answers: [{ value: "c", next: "End" }] },
            },
        }"#;
        let table = parse_question_table(input).unwrap();
        assert_eq!(table.root, "q1");
        let ids: Vec<&str> = table.questions.keys().map(String::as_str).collect();
        assert_eq!(ids, vec!["q1", "q2"]);
    }

    #[test]
    fn parses_flat_json_map_with_default_root() {
        let input = r#"{
            "start": { "text": "Go?", "answers": [{ "value": "yes", "next": "Gone" }] }
        }"#;
        let table = parse_question_table(input).unwrap();
        assert_eq!(table.root, DEFAULT_ROOT);
        assert_eq!(table.questions["start"].answers.len(), 1);
    }

    #[test]
    fn json5_may_open_with_comments() {
        let input = "// quiz\n/* second\n line */\n{ root: \"start\", questions: { start: { text: \"Go?\", answers: [{ value: \"y\", next: \"Done\" }] } } }";
        let table = parse_question_table(input).unwrap();
        assert_eq!(table.root, "start");
        assert_eq!(table.questions["start"].answers[0].next, "Done");
    }

    #[test]
    fn trivia_skipping_stops_at_content() {
        assert_eq!(skip_json5_trivia("  // a\n  // b\n{}"), "{}");
        assert_eq!(skip_json5_trivia("/* open"), "/* open");
        assert_eq!(skip_json5_trivia("// only a comment"), "");
        assert_eq!(skip_json5_trivia("# outline\nroot a"), "# outline\nroot a");
    }

    #[test]
    fn rejects_answer_before_question() {
        let err = parse_question_table("  yes -> Somewhere\n").unwrap_err();
        assert!(matches!(err, ParseError::Syntax { line: 1, .. }));
    }

    #[test]
    fn rejects_duplicate_question() {
        let input = "a: One\n  x -> b\na: Again\n  y -> c\n";
        assert_eq!(
            parse_question_table(input).unwrap_err(),
            ParseError::DuplicateQuestion("a".to_string())
        );
    }

    #[test]
    fn rejects_question_without_answers() {
        let input = "start: Lonely\n";
        assert_eq!(
            parse_question_table(input).unwrap_err(),
            ParseError::NoAnswers("start".to_string())
        );
    }

    #[test]
    fn reports_line_of_bad_answer() {
        let input = "start: Q\n  yes Somewhere\n";
        let err = parse_question_table(input).unwrap_err();
        assert_eq!(err.to_string(), "line 2: expected `label -> next`, found `yes Somewhere`");
    }

    #[test]
    fn empty_outline_is_an_empty_table() {
        let table = parse_question_table("# nothing here\n").unwrap();
        assert!(table.is_empty());
    }
}
