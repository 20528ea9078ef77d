//! Typed encoding/decoding for trivia-core messages.
//!
//! Client -> server:
//!
//! ```text
//! NameReturn        1|<name>\
//! QuestionResponse  4|<choice digit>\
//! ```
//!
//! Server -> client:
//!
//! ```text
//! NameQuery         0\
//! GameStart         2\
//! QuestionSend      3|<index>|<prompt>|<opt0>|<opt1>|<opt2>\
//! AnswerBroadcast   5|<correct option text>\
//! Disconnect        6\
//! ```
//!
//! Decoders reject opcodes that belong to the other direction.

use trivia_core::{ClientMessage, ServerMessage};

use crate::frame_codec::{encode_frame, FieldTokenizer, ProtocolError};
use crate::wire_types::Opcode;

/// Encode a player message as one terminated frame.
pub fn encode_client(msg: &ClientMessage) -> Result<Vec<u8>, ProtocolError> {
    let mut out = Vec::with_capacity(32);
    match msg {
        ClientMessage::NameReturn { name } => {
            encode_frame(Opcode::NameReturn, &[name.as_str()], &mut out)?
        }
        ClientMessage::QuestionResponse { choice } => {
            encode_frame(Opcode::QuestionResponse, &[choice.as_str()], &mut out)?
        }
    }
    Ok(out)
}

/// Decode a player frame (terminator optional).
pub fn decode_client(frame: &[u8]) -> Result<ClientMessage, ProtocolError> {
    let mut tokens = FieldTokenizer::new(frame)?;
    let opcode = tokens.opcode()?;

    let msg = match opcode {
        Opcode::NameReturn => ClientMessage::NameReturn {
            name: tokens.expect_field(opcode)?.to_string(),
        },
        Opcode::QuestionResponse => ClientMessage::QuestionResponse {
            choice: tokens.expect_field(opcode)?.to_string(),
        },
        other => return Err(ProtocolError::UnexpectedOpcode(other)),
    };

    tokens.finish(opcode)?;
    Ok(msg)
}

/// Encode a server broadcast as one terminated frame.
pub fn encode_server(msg: &ServerMessage) -> Result<Vec<u8>, ProtocolError> {
    let mut out = Vec::with_capacity(64);
    match msg {
        ServerMessage::NameQuery => encode_frame(Opcode::NameQuery, &[], &mut out)?,
        ServerMessage::GameStart => encode_frame(Opcode::GameStart, &[], &mut out)?,
        ServerMessage::QuestionSend {
            index,
            prompt,
            options,
        } => {
            let index = index.to_string();
            encode_frame(
                Opcode::QuestionSend,
                &[
                    index.as_str(),
                    prompt.as_str(),
                    options[0].as_str(),
                    options[1].as_str(),
                    options[2].as_str(),
                ],
                &mut out,
            )?
        }
        ServerMessage::AnswerBroadcast { answer } => {
            encode_frame(Opcode::AnswerBroadcast, &[answer.as_str()], &mut out)?
        }
        ServerMessage::Disconnect => encode_frame(Opcode::Disconnect, &[], &mut out)?,
    }
    Ok(out)
}

/// Decode a server frame (terminator optional).
pub fn decode_server(frame: &[u8]) -> Result<ServerMessage, ProtocolError> {
    let mut tokens = FieldTokenizer::new(frame)?;
    let opcode = tokens.opcode()?;

    let msg = match opcode {
        Opcode::NameQuery => ServerMessage::NameQuery,
        Opcode::GameStart => ServerMessage::GameStart,
        Opcode::QuestionSend => {
            let index = tokens
                .expect_field(opcode)?
                .trim()
                .parse::<usize>()
                .map_err(|_| ProtocolError::InvalidField("index"))?;
            let prompt = tokens.expect_field(opcode)?.to_string();
            let options = [
                tokens.expect_field(opcode)?.to_string(),
                tokens.expect_field(opcode)?.to_string(),
                tokens.expect_field(opcode)?.to_string(),
            ];
            ServerMessage::QuestionSend {
                index,
                prompt,
                options,
            }
        }
        Opcode::AnswerBroadcast => ServerMessage::AnswerBroadcast {
            answer: tokens.expect_field(opcode)?.to_string(),
        },
        Opcode::Disconnect => ServerMessage::Disconnect,
        other => return Err(ProtocolError::UnexpectedOpcode(other)),
    };

    tokens.finish(opcode)?;
    Ok(msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question() -> ServerMessage {
        ServerMessage::QuestionSend {
            index: 1,
            prompt: "Which is a prime?".to_string(),
            options: ["4".to_string(), "6".to_string(), "7".to_string()],
        }
    }

    #[test]
    fn server_messages_on_the_wire() {
        assert_eq!(encode_server(&ServerMessage::NameQuery).unwrap(), b"0\\");
        assert_eq!(encode_server(&ServerMessage::Disconnect).unwrap(), b"6\\");
        assert_eq!(
            encode_server(&ServerMessage::answer("7")).unwrap(),
            b"5|7\\"
        );
        assert_eq!(
            encode_server(&question()).unwrap(),
            b"3|1|Which is a prime?|4|6|7\\"
        );
    }

    #[test]
    fn client_messages_on_the_wire() {
        let name = ClientMessage::NameReturn {
            name: "alice".to_string(),
        };
        let answer = ClientMessage::QuestionResponse {
            choice: "3".to_string(),
        };

        assert_eq!(encode_client(&name).unwrap(), b"1|alice\\");
        assert_eq!(encode_client(&answer).unwrap(), b"4|3\\");
    }

    #[test]
    fn server_round_trip() {
        for msg in [
            ServerMessage::NameQuery,
            ServerMessage::GameStart,
            question(),
            ServerMessage::answer("Jupiter"),
            ServerMessage::Disconnect,
        ] {
            let bytes = encode_server(&msg).unwrap();
            assert_eq!(decode_server(&bytes).unwrap(), msg);
        }
    }

    #[test]
    fn client_round_trip() {
        for msg in [
            ClientMessage::NameReturn {
                name: "Zoë".to_string(),
            },
            ClientMessage::QuestionResponse {
                choice: "2".to_string(),
            },
        ] {
            let bytes = encode_client(&msg).unwrap();
            assert_eq!(decode_client(&bytes).unwrap(), msg);
        }
    }

    #[test]
    fn direction_is_enforced() {
        assert_eq!(
            decode_client(b"0\\"),
            Err(ProtocolError::UnexpectedOpcode(Opcode::NameQuery))
        );
        assert_eq!(
            decode_server(b"4|1\\"),
            Err(ProtocolError::UnexpectedOpcode(Opcode::QuestionResponse))
        );
    }

    #[test]
    fn field_counts_are_enforced() {
        assert!(matches!(
            decode_server(b"3|0|prompt|a|b\\"),
            Err(ProtocolError::FieldCount { got: 4, .. })
        ));
        assert!(matches!(
            decode_client(b"1|a|b\\"),
            Err(ProtocolError::FieldCount { got: 2, .. })
        ));
        assert!(matches!(
            decode_server(b"6|extra\\"),
            Err(ProtocolError::FieldCount { expected: 0, got: 1, .. })
        ));
    }

    #[test]
    fn question_index_must_be_numeric() {
        assert_eq!(
            decode_server(b"3|x|p|a|b|c\\"),
            Err(ProtocolError::InvalidField("index"))
        );
    }

    #[test]
    fn name_with_separator_cannot_be_encoded() {
        let msg = ClientMessage::NameReturn {
            name: "a|b".to_string(),
        };
        assert!(matches!(
            encode_client(&msg),
            Err(ProtocolError::ReservedByte(_))
        ));
    }
}
