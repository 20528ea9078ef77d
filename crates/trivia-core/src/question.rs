//! Questions and the ordered question bank.

use crate::error::QuestionError;

/// Every question offers exactly this many options.
pub const OPTION_COUNT: usize = 3;

/// Bytes that frame the wire protocol and so may never appear in
/// question text.
const RESERVED: [char; 2] = ['|', '\\'];

/// A multiple-choice question. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    prompt: String,
    options: [String; OPTION_COUNT],
    correct_index: usize,
}

impl Question {
    /// Build a question, checking that the options are distinct, the
    /// answer index is in range and no text contains a framing byte.
    pub fn new(
        prompt: impl Into<String>,
        options: [String; OPTION_COUNT],
        correct_index: usize,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();

        if prompt.is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if correct_index >= OPTION_COUNT {
            return Err(QuestionError::AnswerOutOfRange(correct_index));
        }

        if has_reserved(&prompt) || options.iter().any(|o| has_reserved(o)) {
            return Err(QuestionError::ReservedCharacter);
        }

        for (i, a) in options.iter().enumerate() {
            if options[i + 1..].contains(a) {
                return Err(QuestionError::DuplicateOption);
            }
        }

        Ok(Question {
            prompt,
            options,
            correct_index,
        })
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn options(&self) -> &[String; OPTION_COUNT] {
        &self.options
    }

    /// Zero-based index of the correct option.
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    /// Text of the correct option.
    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_index]
    }

    /// Whether a one-based choice digit (`"1"`..`"3"`) picks the correct
    /// option. Anything that is not such a digit is a wrong answer.
    pub fn is_correct_choice(&self, choice: &str) -> bool {
        choice
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|digit| digit.checked_sub(1))
            == Some(self.correct_index)
    }
}

fn has_reserved(s: &str) -> bool {
    s.chars().any(|c| RESERVED.contains(&c))
}

/// Ordered, non-growing list of questions for one game.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Self {
        QuestionBank { questions }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }
}

impl From<Vec<Question>> for QuestionBank {
    fn from(questions: Vec<Question>) -> Self {
        QuestionBank::new(questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(a: &str, b: &str, c: &str) -> [String; OPTION_COUNT] {
        [a.to_string(), b.to_string(), c.to_string()]
    }

    #[test]
    fn choice_digits_are_one_based() {
        let q = Question::new("Largest planet?", opts("Mars", "Jupiter", "Venus"), 1).unwrap();

        assert!(q.is_correct_choice("2"));
        assert!(!q.is_correct_choice("1"));
        assert!(!q.is_correct_choice("3"));
        assert_eq!(q.correct_option(), "Jupiter");
    }

    #[test]
    fn non_digit_choice_is_wrong() {
        let q = Question::new("Pick one", opts("a", "b", "c"), 0).unwrap();

        assert!(!q.is_correct_choice("x"));
        assert!(!q.is_correct_choice("0"));
        assert!(!q.is_correct_choice(""));
    }

    #[test]
    fn rejects_duplicate_options() {
        let err = Question::new("Pick one", opts("a", "b", "a"), 0).unwrap_err();
        assert_eq!(err, QuestionError::DuplicateOption);
    }

    #[test]
    fn rejects_framing_bytes() {
        let err = Question::new("a|b", opts("a", "b", "c"), 0).unwrap_err();
        assert_eq!(err, QuestionError::ReservedCharacter);

        let err = Question::new("ok", opts("a\\", "b", "c"), 0).unwrap_err();
        assert_eq!(err, QuestionError::ReservedCharacter);
    }

    #[test]
    fn rejects_answer_out_of_range() {
        let err = Question::new("Pick one", opts("a", "b", "c"), 3).unwrap_err();
        assert_eq!(err, QuestionError::AnswerOutOfRange(3));
    }
}
