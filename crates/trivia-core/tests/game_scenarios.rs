// crates/trivia-core/tests/game_scenarios.rs
use trivia_core::{
    parse_questions, ClientMessage, ConnectionId, GameContext, Phase, PlayerId, ServerMessage,
};
use trivia_protocol::{decode_client, encode_server};

const TWO_QUESTIONS: &str = include_str!("data/two_questions.txt");
const QSHORT: &str = include_str!("data/qshort.txt");

fn seated_game(text: &str) -> GameContext {
    let bank = parse_questions("fixture", text).expect("fixture parses");
    let mut game = GameContext::new(bank, 3);
    for conn in [4, 5, 6] {
        game.register(ConnectionId(conn)).unwrap();
    }
    game
}

/// Feed raw client frames through the decoder and the game, collecting
/// the broadcasts as wire text.
fn play(game: &mut GameContext, script: &[(usize, &str)]) -> Vec<String> {
    let mut wire = Vec::new();
    for (player, frame) in script {
        let msg = decode_client(frame.as_bytes()).expect("script frame decodes");
        for out in game.handle(PlayerId(*player), msg) {
            let bytes = encode_server(&out).unwrap();
            wire.push(String::from_utf8(bytes).unwrap());
        }
    }
    wire
}

#[test]
fn fixture_correct_indices() {
    let bank = parse_questions("two_questions.txt", TWO_QUESTIONS).unwrap();
    let indices: Vec<usize> = bank.iter().map(|q| q.correct_index()).collect();
    assert_eq!(indices, vec![0, 2]);

    let bank = parse_questions("qshort.txt", QSHORT).unwrap();
    assert_eq!(bank.len(), 4);
}

#[test]
fn full_game_over_the_wire() {
    let mut game = seated_game(TWO_QUESTIONS);

    let wire = play(
        &mut game,
        &[
            (0, "1|ann\\"),
            (1, "1|bob\\"),
            (2, "1|cat\\"),
            (1, "4|1\\"),
            (1, "4|3\\"),
        ],
    );

    assert_eq!(
        wire,
        vec![
            "3|0|Which colour do you get by mixing blue and yellow?|green|purple|orange\\",
            "5|green\\",
            "3|1|Which planet is closest to the sun?|Venus|Earth|Mercury\\",
            "5|Mercury\\",
            "6\\",
        ]
    );

    assert_eq!(game.phase(), Phase::Ended);
    assert_eq!(game.player(PlayerId(1)).unwrap().score, 2);
    assert_eq!(game.player(PlayerId(0)).unwrap().score, 0);

    let (winner, player) = game.winner().unwrap();
    assert_eq!(winner, PlayerId(1));
    assert_eq!(player.name, "bob");
}

#[test]
fn phases_and_index_only_move_forward() {
    let mut game = seated_game(QSHORT);
    let mut last_phase = game.phase();
    let mut last_index = game.question_index();

    let script: Vec<(usize, ClientMessage)> = vec![
        (0, ClientMessage::QuestionResponse { choice: "1".into() }),
        (0, ClientMessage::NameReturn { name: "ann".into() }),
        (1, ClientMessage::NameReturn { name: "bob".into() }),
        (2, ClientMessage::NameReturn { name: "cat".into() }),
        (2, ClientMessage::QuestionResponse { choice: "2".into() }),
        (0, ClientMessage::NameReturn { name: "late".into() }),
        (0, ClientMessage::QuestionResponse { choice: "9".into() }),
        (1, ClientMessage::QuestionResponse { choice: "3".into() }),
        (1, ClientMessage::QuestionResponse { choice: "1".into() }),
        (2, ClientMessage::QuestionResponse { choice: "1".into() }),
    ];

    for (player, msg) in script {
        game.handle(PlayerId(player), msg);
        assert!(game.phase() >= last_phase);
        assert!(game.question_index() >= last_index);
        assert!(game.question_index() <= game.total_questions());
        assert_eq!(
            game.phase() == Phase::Ended,
            game.question_index() == game.total_questions()
        );
        last_phase = game.phase();
        last_index = game.question_index();
    }

    assert_eq!(game.phase(), Phase::Ended);
}

#[test]
fn score_is_correct_minus_incorrect() {
    let mut game = seated_game(QSHORT);
    play(
        &mut game,
        &[(0, "1|ann\\"), (1, "1|bob\\"), (2, "1|cat\\")],
    );

    // answers: Canberra(2) right, six(1) wrong, oxygen(1) wrong, 42(1) right
    for choice in ["2", "1", "1", "1"] {
        let frame = format!("4|{}\\", choice);
        play(&mut game, &[(0, frame.as_str())]);
    }

    assert!(game.is_ended());
    assert_eq!(game.player(PlayerId(0)).unwrap().score, 0);

    let scores: Vec<i32> = game.players().iter().map(|(_, p)| p.score).collect();
    assert_eq!(scores, vec![0, 0, 0]);
    assert_eq!(game.winner().unwrap().0, PlayerId(0));
}

#[test]
fn every_question_wrong_goes_negative() {
    let mut game = seated_game(QSHORT);
    play(
        &mut game,
        &[(0, "1|ann\\"), (1, "1|bob\\"), (2, "1|cat\\")],
    );
    for _ in 0..4 {
        play(&mut game, &[(2, "4|x\\")]);
    }

    assert_eq!(game.player(PlayerId(2)).unwrap().score, -4);
    assert_eq!(game.winner().unwrap().0, PlayerId(0));
}

#[test]
fn begin_then_gate_on_all_names() {
    let mut game = seated_game(TWO_QUESTIONS);
    assert_eq!(game.begin(), vec![ServerMessage::NameQuery]);

    assert!(play(&mut game, &[(0, "1|ann\\"), (1, "1|bob\\")]).is_empty());
    assert_eq!(game.phase(), Phase::WaitingForNames);

    let wire = play(&mut game, &[(2, "1|cat\\")]);
    assert_eq!(wire.len(), 1);
    assert!(wire[0].starts_with("3|0|"));
    assert_eq!(game.phase(), Phase::InProgress);
}
