use std::io;
use std::io::{Cursor, Write};

use byteorder::WriteBytesExt;
use sha1::{Digest, Sha1};

use crate::NULL_TERMINATOR;

pub fn write_null_term_string(cursor: &mut Cursor<&mut Vec<u8>>, str: &str) -> Result<(), io::Error> {
    cursor.write_all(str.as_bytes())?;
    cursor.write_u8(NULL_TERMINATOR)?;

    Ok(())
}

/// mysql_native_password scramble:
/// `xor(SHA1(password), SHA1(salt[..20] || SHA1(SHA1(password))))`.
/// An empty password hashes to an empty reply, not twenty zero bytes.
///
/// see https://dev.mysql.com/doc/internals/en/secure-password-authentication.html
pub fn native_password(password: &str, salt: &[u8]) -> Vec<u8> {
    if password.is_empty() {
        return Vec::new();
    }

    let password_hash = sha1(password.as_bytes());
    let salt = &salt[..salt.len().min(20)];
    let concat_hash = [salt.to_vec(), sha1(&password_hash)].concat();
    xor(&password_hash, &sha1(&concat_hash))
}

pub fn xor(slice1: &[u8], slice2: &[u8]) -> Vec<u8> {
    let mut result = vec![0u8; slice1.len()];
    for i in 0..result.len() {
        result[i] = slice1[i] ^ slice2[i % slice2.len()];
    }
    result
}

pub fn sha1(value: &[u8]) -> Vec<u8> {
    let mut hasher = Sha1::new();
    hasher.update(value);
    hasher.finalize().as_slice().to_vec()
}
