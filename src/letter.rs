/// One of the 26 ASCII letters, case-folded. Used as the bucket key of a
/// `WordIndex`, so a bucket index can never fall outside `0..26`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Letter(u8);

impl Letter {
    pub const COUNT: usize = 26;

    pub fn from_char(c: char) -> Option<Letter> {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        Some(Letter(c.to_ascii_lowercase() as u8 - b'a'))
    }

    /// Letter of the first character of `word`, if it is an ASCII letter.
    pub fn of_word(word: &str) -> Option<Letter> {
        word.chars().next().and_then(Letter::from_char)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }

    pub fn as_char(&self) -> char {
        (b'a' + self.0) as char
    }

    pub fn all() -> impl Iterator<Item = Letter> {
        (0..Self::COUNT as u8).map(Letter)
    }
}
