//! AES-128 key schedule and block encryption/decryption.

use crate::gf;
use crate::key::{Aes128Key, KeySchedule, KEY_WORDS, ROUNDS, SCHEDULE_COLUMNS};
use crate::round::{
    add_round_key, inv_mix_columns, inv_shift_rows, inv_sub_bytes, mix_columns, shift_rows,
    sub_bytes,
};
use crate::sbox::sbox;
use crate::state::{Block, State, Word};
use crate::trace::{step, Silent, Stage, TraceSink};

/// Round constants; row 0 holds the successive powers of `{02}`.
pub const RCON: [[u8; ROUNDS]; 4] = [
    [0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80, 0x1b, 0x36],
    [0x00; ROUNDS],
    [0x00; ROUNDS],
    [0x00; ROUNDS],
];

fn rot_word(word: Word) -> Word {
    let mut rotated = word;
    rotated.rotate_left(1);
    rotated
}

fn sub_word(word: Word) -> Word {
    word.map(sbox)
}

fn rcon_word(index: usize) -> Word {
    [RCON[0][index], RCON[1][index], RCON[2][index], RCON[3][index]]
}

fn xor_words(a: Word, b: Word) -> Word {
    core::array::from_fn(|i| gf::add(a[i], b[i]))
}

/// Expands a 128-bit key into the 4×44 key schedule.
pub fn expand_key(key: &Aes128Key) -> KeySchedule {
    let mut w = [[0u8; 4]; SCHEDULE_COLUMNS];
    for (i, word) in w.iter_mut().take(KEY_WORDS).enumerate() {
        *word = key.word(i);
    }

    for i in KEY_WORDS..SCHEDULE_COLUMNS {
        let mut temp = w[i - 1];
        if i % KEY_WORDS == 0 {
            temp = xor_words(sub_word(rot_word(temp)), rcon_word((i - 1) / KEY_WORDS));
        }
        w[i] = xor_words(w[i - KEY_WORDS], temp);
    }

    KeySchedule::from_words(w)
}

/// Runs the forward cipher on one state.
pub fn cipher(input: &State, schedule: &KeySchedule) -> State {
    cipher_traced(input, schedule, &mut Silent)
}

/// Runs the forward cipher, reporting every intermediate state to `sink`.
pub fn cipher_traced<S: TraceSink + ?Sized>(
    input: &State,
    schedule: &KeySchedule,
    sink: &mut S,
) -> State {
    let first_key = schedule.round_key(0);
    sink.line(format_args!("PLAINTEXT: {input}"));
    sink.line(format_args!("KEY: {first_key}"));
    sink.line(format_args!("CIPHER (ENCRYPT):"));
    step(sink, 0, Stage::Input, input);
    step(sink, 0, Stage::KeySchedule, &first_key);

    let mut state = add_round_key(*input, &first_key);

    for round in 1..ROUNDS {
        step(sink, round, Stage::Start, &state);
        state = sub_bytes(state);
        step(sink, round, Stage::SubBytes, &state);
        state = shift_rows(state);
        step(sink, round, Stage::ShiftRows, &state);
        state = mix_columns(state);
        step(sink, round, Stage::MixColumns, &state);
        let round_key = schedule.round_key(round);
        state = add_round_key(state, &round_key);
        step(sink, round, Stage::KeySchedule, &round_key);
    }

    step(sink, ROUNDS, Stage::Start, &state);
    state = sub_bytes(state);
    step(sink, ROUNDS, Stage::SubBytes, &state);
    state = shift_rows(state);
    step(sink, ROUNDS, Stage::ShiftRows, &state);
    let last_key = schedule.round_key(ROUNDS);
    step(sink, ROUNDS, Stage::KeySchedule, &last_key);
    state = add_round_key(state, &last_key);
    step(sink, ROUNDS, Stage::Output, &state);

    state
}

/// Runs the inverse cipher on one state.
pub fn inv_cipher(input: &State, schedule: &KeySchedule) -> State {
    inv_cipher_traced(input, schedule, &mut Silent)
}

/// Runs the inverse cipher, reporting every intermediate state to `sink`.
///
/// Trace rounds count upwards from 1 while round keys are consumed from 9
/// down to 1.
pub fn inv_cipher_traced<S: TraceSink + ?Sized>(
    input: &State,
    schedule: &KeySchedule,
    sink: &mut S,
) -> State {
    let last_key = schedule.round_key(ROUNDS);
    sink.line(format_args!("INVERSE CIPHER (DECRYPT):"));
    step(sink, 0, Stage::InvInput, input);
    step(sink, 0, Stage::InvKeySchedule, &last_key);

    let mut state = add_round_key(*input, &last_key);

    for (trace_round, key_round) in (1..ROUNDS).zip((1..ROUNDS).rev()) {
        step(sink, trace_round, Stage::InvStart, &state);
        state = inv_shift_rows(state);
        step(sink, trace_round, Stage::InvShiftRows, &state);
        state = inv_sub_bytes(state);
        step(sink, trace_round, Stage::InvSubBytes, &state);
        let round_key = schedule.round_key(key_round);
        state = add_round_key(state, &round_key);
        step(sink, trace_round, Stage::InvKeySchedule, &round_key);
        step(sink, trace_round, Stage::InvKeyAdd, &state);
        state = inv_mix_columns(state);
    }

    step(sink, ROUNDS, Stage::InvStart, &state);
    state = inv_shift_rows(state);
    step(sink, ROUNDS, Stage::InvShiftRows, &state);
    state = inv_sub_bytes(state);
    step(sink, ROUNDS, Stage::InvSubBytes, &state);
    let first_key = schedule.round_key(0);
    state = add_round_key(state, &first_key);
    step(sink, ROUNDS, Stage::InvKeySchedule, &first_key);
    step(sink, ROUNDS, Stage::InvOutput, &state);

    state
}

/// Encrypts a single 16-byte block with a pre-expanded key schedule.
pub fn encrypt_block(block: &Block, schedule: &KeySchedule) -> Block {
    cipher(&State::from_bytes(block), schedule).to_bytes()
}

/// Decrypts a single 16-byte block with a pre-expanded key schedule.
pub fn decrypt_block(block: &Block, schedule: &KeySchedule) -> Block {
    inv_cipher(&State::from_bytes(block), schedule).to_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::Aes128Key;
    use rand::RngCore;

    const NIST_KEY: [u8; 16] = [
        0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e,
        0x0f,
    ];
    const NIST_PLAIN: [u8; 16] = [
        0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee,
        0xff,
    ];
    const NIST_CIPHER: [u8; 16] = [
        0x69, 0xc4, 0xe0, 0xd8, 0x6a, 0x7b, 0x04, 0x30, 0xd8, 0xcd, 0xb7, 0x80, 0x70, 0xb4, 0xc5,
        0x5a,
    ];

    #[test]
    fn encrypt_matches_nist_vector() {
        let key = Aes128Key::from(NIST_KEY);
        let schedule = expand_key(&key);
        let ct = encrypt_block(&NIST_PLAIN, &schedule);
        assert_eq!(ct, NIST_CIPHER);
    }

    #[test]
    fn decrypt_matches_nist_vector() {
        let key = Aes128Key::from(NIST_KEY);
        let schedule = expand_key(&key);
        let pt = decrypt_block(&NIST_CIPHER, &schedule);
        assert_eq!(pt, NIST_PLAIN);
    }

    #[test]
    fn key_expansion_matches_fips_appendix_a1() {
        let key = Aes128Key::from_hex("2b7e151628aed2a6abf7158809cf4f3c").unwrap();
        let schedule = expand_key(&key);
        assert_eq!(schedule.column(4), [0xa0, 0xfa, 0xfe, 0x17]);
        assert_eq!(schedule.column(5), [0x88, 0x54, 0x2c, 0xb1]);
        assert_eq!(schedule.column(43), [0xb6, 0x63, 0x0c, 0xa6]);
        assert_eq!(
            schedule.round_key(10).to_string(),
            "d014f9a8c9ee2589e13f0cc8b6630ca6"
        );
    }

    #[test]
    fn schedule_starts_with_key_and_is_deterministic() {
        let key = Aes128Key::from(NIST_KEY);
        let first = expand_key(&key);
        let second = expand_key(&key);
        assert_eq!(first, second);
        for i in 0..KEY_WORDS {
            assert_eq!(first.column(i), key.word(i));
        }
        assert_eq!(first.round_key(0), *key.state());
        assert_eq!(first.get(1, 0), 0x01);
    }

    #[test]
    fn rot_and_sub_word() {
        assert_eq!(rot_word([0x09, 0xcf, 0x4f, 0x3c]), [0xcf, 0x4f, 0x3c, 0x09]);
        assert_eq!(sub_word([0xcf, 0x4f, 0x3c, 0x09]), [0x8a, 0x84, 0xeb, 0x01]);
        assert_eq!(rcon_word(9), [0x36, 0, 0, 0]);
    }

    #[test]
    fn untraced_and_traced_agree() {
        let schedule = expand_key(&Aes128Key::from(NIST_KEY));
        let input = State::from_bytes(&NIST_PLAIN);
        let mut lines: Vec<String> = Vec::new();
        let traced = cipher_traced(&input, &schedule, &mut lines);
        assert_eq!(traced, cipher(&input, &schedule));
        // 3 banner lines, 2 for round 0, 5 for each of rounds 1..=10
        assert_eq!(lines.len(), 3 + 2 + 5 * 10);

        let mut inv_lines: Vec<String> = Vec::new();
        assert_eq!(inv_cipher_traced(&traced, &schedule, &mut inv_lines), input);
        assert_eq!(inv_lines.len(), 1 + 2 + 5 * 10);
    }

    #[test]
    fn encrypt_decrypt_round_trip_random() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let mut key_bytes = [0u8; 16];
            let mut block = [0u8; 16];
            rng.fill_bytes(&mut key_bytes);
            rng.fill_bytes(&mut block);
            let key = Aes128Key::from(key_bytes);
            let schedule = expand_key(&key);
            let ct = encrypt_block(&block, &schedule);
            let pt = decrypt_block(&ct, &schedule);
            assert_eq!(pt, block);
        }
    }
}
