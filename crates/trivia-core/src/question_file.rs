//! Question-file parser.
//!
//! The file is a sequence of four-line cycles:
//!
//! ```text
//! <prompt>
//! <option> <option> <option>
//! <answer, equal to one of the options>
//! <blank separator>
//! ```
//!
//! The first cycle starts directly with a prompt and the separator after
//! the last cycle is optional. Any deviation is fatal and reported with
//! the file name and the 1-based line number.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{QuestionError, QuestionFileError};
use crate::question::{Question, QuestionBank, OPTION_COUNT};

const OPTION_DELIM: char = ' ';

/// Which line of the cycle comes next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    Separator,
    Prompt,
    Options,
    Answer,
}

/// Read and parse a question file from disk.
pub fn load_questions(path: impl AsRef<Path>) -> Result<QuestionBank, QuestionFileError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| QuestionFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_questions(&path.display().to_string(), &text)
}

/// Parse question-file text. `file` is only used in error messages.
pub fn parse_questions(file: &str, text: &str) -> Result<QuestionBank, QuestionFileError> {
    let fail = |line: usize, reason: &str| QuestionFileError::Parse {
        file: file.to_string(),
        line,
        reason: reason.to_string(),
    };

    let mut questions = Vec::new();
    let mut expect = Expect::Prompt;
    let mut prompt = String::new();
    let mut options: Vec<String> = Vec::with_capacity(OPTION_COUNT);
    let mut line_num = 0;

    for (idx, line) in text.lines().enumerate() {
        line_num = idx + 1;

        match expect {
            Expect::Separator => {
                if !line.is_empty() {
                    return Err(fail(line_num, "Expected separator line."));
                }
                expect = Expect::Prompt;
            }

            Expect::Prompt => {
                if line.chars().count() < 2 {
                    return Err(fail(
                        line_num,
                        "Expected prompt string (received empty line).",
                    ));
                }
                if has_reserved(line) {
                    return Err(fail(line_num, &QuestionError::ReservedCharacter.to_string()));
                }
                prompt = line.to_string();
                expect = Expect::Options;
            }

            Expect::Options => {
                if line.is_empty() {
                    return Err(fail(
                        line_num,
                        "Expected option string (received empty line).",
                    ));
                }

                options = line.split(OPTION_DELIM).map(str::to_string).collect();
                if options.len() != OPTION_COUNT {
                    return Err(fail(line_num, "Invalid amount of options."));
                }
                if has_reserved(line) {
                    return Err(fail(line_num, &QuestionError::ReservedCharacter.to_string()));
                }
                expect = Expect::Answer;
            }

            Expect::Answer => {
                let correct_index = options
                    .iter()
                    .position(|opt| opt == line)
                    .ok_or_else(|| fail(line_num, "Supplied answer not defined in options."))?;

                let opts: [String; OPTION_COUNT] = std::mem::take(&mut options)
                    .try_into()
                    .map_err(|_| fail(line_num, "Invalid amount of options."))?;

                let question = Question::new(std::mem::take(&mut prompt), opts, correct_index)
                    .map_err(|e| fail(line_num, &e.to_string()))?;

                debug!(
                    index = questions.len(),
                    prompt = question.prompt(),
                    answer = question.correct_option(),
                    "loaded question"
                );
                questions.push(question);
                expect = Expect::Separator;
            }
        }
    }

    if matches!(expect, Expect::Options | Expect::Answer) {
        return Err(fail(line_num + 1, "Unexpected end of file."));
    }

    if questions.is_empty() {
        return Err(QuestionFileError::Empty {
            file: file.to_string(),
        });
    }

    Ok(QuestionBank::new(questions))
}

fn has_reserved(s: &str) -> bool {
    s.contains(['|', '\\'])
}
