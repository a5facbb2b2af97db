//! Interned words: immutable byte slices with a precomputed FNV-1a hash.
//! Grounded in `original_source/src/words.c`'s `Word`/`Word_eq` — equality
//! is `(len, hash)`, not byte comparison, which is why `Interner` verifies
//! full bytes on insertion rather than trusting the hash alone at lookup
//! time (spec.md §3, §4.1).

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::common::arena::Arena;
use crate::error::Bug;

const FNV_OFFSET: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x100000001b3;

fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET;
    for &b in bytes {
        hash ^= b as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// An interned, pre-hashed byte slice. Two `Word`s compare equal iff their
/// lengths and FNV-1a hashes match (spec.md §3) — the `Interner` that
/// produced them guarantees no two distinct byte sequences it has ever
/// registered share a `(len, hash)` pair.
#[derive(Clone, Copy)]
pub struct Word<'a> {
    bytes: &'a [u8],
    hash: u64,
}

impl<'a> Word<'a> {
    /// Builds a `Word` directly from an already-arena-owned byte slice.
    /// Does not intern — two calls with equal bytes produce `Word`s that
    /// compare equal but may point at different allocations. Prefer
    /// `Interner::intern` unless you already hold an arena slice.
    pub fn new(bytes: &'a [u8]) -> Word<'a> {
        Word { bytes, hash: fnv1a(bytes) }
    }

    pub fn as_bytes(&self) -> &'a [u8] { self.bytes }

    pub fn as_str(&self) -> &'a str {
        std::str::from_utf8(self.bytes).expect("Word bytes must be valid utf-8")
    }

    pub fn len(&self) -> usize { self.bytes.len() }
    pub fn is_empty(&self) -> bool { self.bytes.is_empty() }
    pub fn hash64(&self) -> u64 { self.hash }
}

impl PartialEq for Word<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.hash == other.hash
    }
}
impl Eq for Word<'_> {}

impl Hash for Word<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash.hash(state);
        self.len().hash(state);
    }
}

impl fmt::Debug for Word<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word({:?})", self.as_str())
    }
}

impl fmt::Display for Word<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Promotes strings into `Word`s backed by a single arena, deduplicating
/// identical byte sequences to a single allocation. Mirrors
/// `Word_copy_of`'s "copy by arena-promotion, never by reference sharing
/// across arenas" contract (spec.md §3).
pub struct Interner<'a> {
    arena: &'a Arena,
    // keyed by the actual bytes so we can detect and reject the case spec.md
    // §3 calls out: two distinct byte sequences that would collide under
    // (len, hash). In the registered universe this never fires; if it ever
    // did, it is an internal invariant violation (spec.md §7), not silent
    // merging.
    seen: std::cell::RefCell<HashMap<(usize, u64), &'a [u8]>>,
}

impl<'a> Interner<'a> {
    pub fn new(arena: &'a Arena) -> Interner<'a> {
        Interner { arena, seen: std::cell::RefCell::new(HashMap::new()) }
    }

    /// Interns `s`, copying its bytes into the arena on first sight and
    /// reusing the existing allocation on repeat.
    pub fn intern(&self, s: &str) -> Word<'a> {
        let hash = fnv1a(s.as_bytes());
        let key = (s.len(), hash);

        let mut seen = self.seen.borrow_mut();
        if let Some(existing) = seen.get(&key) {
            if *existing == s.as_bytes() {
                return Word { bytes: existing, hash };
            }
            panic!(
                "{}",
                Bug::at(&format!(
                    "Interner::intern: words {:?} and {:?} collide under (len, hash)",
                    std::str::from_utf8(existing).unwrap_or("<invalid utf8>"),
                    s,
                )),
            );
        }

        let bytes = self.arena.alloc_str(s).as_bytes();
        seen.insert(key, bytes);
        Word { bytes, hash }
    }

    /// Re-interns a `Word` possibly owned by a foreign arena into this
    /// interner's arena (arena-promotion, spec.md §4.1).
    pub fn intern_into(&self, word: Word<'_>) -> Word<'a> {
        self.intern(word.as_str())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn equal_bytes_intern_to_equal_words() {
        let arena = Arena::new();
        let interner = Interner::new(&arena);
        let a = interner.intern("hello");
        let b = interner.intern("hello");
        assert_eq!(a, b);
        assert_eq!(a.as_bytes().as_ptr(), b.as_bytes().as_ptr());
    }

    #[test]
    fn different_bytes_are_unequal() {
        let arena = Arena::new();
        let interner = Interner::new(&arena);
        assert_ne!(interner.intern("foo"), interner.intern("bar"));
    }

    #[test]
    fn hash_is_stable_fnv1a() {
        // FNV-1a of "" is the offset basis.
        assert_eq!(fnv1a(b""), FNV_OFFSET);
    }
}
