/// A cursor for character-by-character scanning of a single line.
///
/// Operates over the line's `char`s so every position it reports is a
/// character offset, the unit hosts use for cursor columns.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The line being scanned.
    pub chars: &'a [char],
    /// Current index into `chars`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a new cursor at the start of `chars`.
    pub fn new(chars: &'a [char]) -> Self {
        Self { chars, i: 0 }
    }

    /// Creates a cursor positioned at `i`.
    pub fn at(chars: &'a [char], i: usize) -> Self {
        Self { chars, i }
    }

    /// Returns the current offset.
    pub fn pos(&self) -> usize {
        self.i
    }

    /// Returns true if at end of line.
    pub fn eof(&self) -> bool {
        self.i >= self.chars.len()
    }

    /// Peeks at the current char without advancing.
    pub fn peek(&self) -> Option<char> {
        self.chars.get(self.i).copied()
    }

    /// Checks if the remaining input starts with `pat`.
    pub fn starts_with(&self, pat: &str) -> bool {
        let rest = self.chars.get(self.i..).unwrap_or(&[]);
        let mut n = 0;
        for c in pat.chars() {
            if rest.get(n) != Some(&c) {
                return false;
            }
            n += 1;
        }
        true
    }

    /// Like [`Cursor::starts_with`], ignoring ASCII case.
    pub fn starts_with_ignore_case(&self, pat: &str) -> bool {
        let rest = self.chars.get(self.i..).unwrap_or(&[]);
        let mut n = 0;
        for c in pat.chars() {
            match rest.get(n) {
                Some(r) if r.eq_ignore_ascii_case(&c) => n += 1,
                _ => return false,
            }
        }
        true
    }

    /// Advances by one char, returning the consumed char.
    pub fn bump(&mut self) -> Option<char> {
        let c = self.chars.get(self.i).copied()?;
        self.i += 1;
        Some(c)
    }

    /// Advances by `n` chars.
    pub fn bump_n(&mut self, n: usize) {
        self.i += n;
    }

    /// Consumes `pat` if the remaining input starts with it.
    pub fn eat(&mut self, pat: &str) -> bool {
        if self.starts_with(pat) {
            self.bump_n(pat.chars().count());
            true
        } else {
            false
        }
    }

    /// Advances while `pred` holds, returning how many chars were consumed.
    pub fn bump_while(&mut self, mut pred: impl FnMut(char) -> bool) -> usize {
        let from = self.i;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.i += 1;
        }
        self.i - from
    }
}
