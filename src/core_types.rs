use crate::consts::KEY_NOT_FOUND_U8;
use crate::error::{KeyGridError, KgResult};

/// The ordered set of movable characters.
///
/// Order matters: the mutator draws alphabet indices, and random layouts
/// shuffle this sequence before laying it out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    chars: Vec<u8>,
    index: [u8; 256],
}

impl Alphabet {
    pub fn new(chars: &[u8]) -> KgResult<Self> {
        if chars.is_empty() {
            return Err(KeyGridError::Config("Alphabet is empty".into()));
        }
        if chars.len() >= KEY_NOT_FOUND_U8 as usize {
            return Err(KeyGridError::Config(format!(
                "Alphabet has {} characters, at most {} are supported",
                chars.len(),
                KEY_NOT_FOUND_U8 - 1
            )));
        }

        let mut index = [KEY_NOT_FOUND_U8; 256];
        for (i, &b) in chars.iter().enumerate() {
            if index[b as usize] != KEY_NOT_FOUND_U8 {
                return Err(KeyGridError::Config(format!(
                    "Alphabet contains '{}' more than once",
                    b.escape_ascii()
                )));
            }
            index[b as usize] = i as u8;
        }

        Ok(Self {
            chars: chars.to_vec(),
            index,
        })
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    #[inline(always)]
    pub fn get(&self, i: usize) -> u8 {
        self.chars[i]
    }

    pub fn position(&self, byte: u8) -> Option<usize> {
        match self.index[byte as usize] {
            KEY_NOT_FOUND_U8 => None,
            i => Some(i as usize),
        }
    }

    #[inline(always)]
    pub fn contains(&self, byte: u8) -> bool {
        self.index[byte as usize] != KEY_NOT_FOUND_U8
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.chars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_duplicates() {
        assert!(Alphabet::new(b"abca").is_err());
        assert!(Alphabet::new(b"").is_err());
    }

    #[test]
    fn positions_follow_input_order() {
        let a = Alphabet::new(b"e t").unwrap();
        assert_eq!(a.position(b'e'), Some(0));
        assert_eq!(a.position(b' '), Some(1));
        assert_eq!(a.position(b'z'), None);
        assert!(a.contains(b't'));
    }
}
