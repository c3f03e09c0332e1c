//! Encoding of move histories into strategy table indices.
//!
//! A history of `memory_size` moves is read as a little-endian bit vector: the
//! move at position `i` contributes `2^i` when it is a cooperation. The oldest
//! move sits at position 0, so a freshly observed move always lands in the most
//! significant bit.

/// Largest supported memory size.
///
/// Strategy tables hold `2^memory_size` entries, so this bounds a single table
/// to 65536 moves.
pub const MAX_MEMORY_SIZE: u32 = 16;

/// Returns the number of entries in a strategy table for the given memory size.
#[must_use]
pub const fn table_len(memory_size: u32) -> usize {
    1 << memory_size
}

/// Encodes a move history into a table index.
///
/// # Examples
///
/// ```
/// use coipd_engine::memory;
///
/// assert_eq!(memory::encode(&[false, false, false]), 0);
/// assert_eq!(memory::encode(&[true, false, true]), 0b101);
/// assert_eq!(memory::encode(&[false, true]), 2);
/// ```
#[must_use]
pub fn encode(memory: &[bool]) -> usize {
    memory
        .iter()
        .enumerate()
        .fold(0, |index, (i, &m)| index | (usize::from(m) << i))
}

/// Decodes a table index back into a move history of length `memory_size`.
///
/// Bits above `memory_size` are ignored.
#[must_use]
pub fn decode(index: usize, memory_size: u32) -> Vec<bool> {
    (0..memory_size).map(|i| (index >> i) & 1 == 1).collect()
}

/// Sliding window over the opponent's most recent moves.
///
/// The window keeps its encoded index up to date instead of storing the moves,
/// so looking up the next move is a single table access. [`Memory::index`] is
/// always equal to [`encode`] applied to the window contents, oldest move first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Memory {
    memory_size: u32,
    index: usize,
}

impl Memory {
    /// Creates a window of `memory_size` defections.
    ///
    /// # Panics
    ///
    /// Panics if `memory_size` is zero or larger than [`MAX_MEMORY_SIZE`].
    #[must_use]
    pub fn new(memory_size: u32) -> Self {
        assert!(
            (1..=MAX_MEMORY_SIZE).contains(&memory_size),
            "memory size must be within 1..={MAX_MEMORY_SIZE}, got {memory_size}"
        );
        Self {
            memory_size,
            index: 0,
        }
    }

    /// Returns the encoded index of the current window.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Drops the oldest move and appends `opponent_move` as the newest one.
    pub fn push(&mut self, opponent_move: bool) {
        self.index = (self.index >> 1) | (usize::from(opponent_move) << (self.memory_size - 1));
    }

    /// Returns the window contents, oldest move first.
    #[must_use]
    pub fn moves(&self) -> Vec<bool> {
        decode(self.index, self.memory_size)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;

    #[test]
    fn test_encode_decode_roundtrip() {
        for memory_size in 1..=10 {
            for index in 0..table_len(memory_size) {
                let memory = decode(index, memory_size);
                assert_eq!(memory.len(), memory_size as usize);
                assert_eq!(encode(&memory), index);
            }
        }
    }

    #[test]
    fn test_encode_is_little_endian() {
        assert_eq!(encode(&[true]), 1);
        assert_eq!(encode(&[true, false, false]), 1);
        assert_eq!(encode(&[false, false, true]), 4);
        assert_eq!(encode(&[true, true, true, true]), 15);
    }

    #[test]
    fn test_decode_ignores_high_bits() {
        assert_eq!(decode(0b1110, 2), vec![false, true]);
    }

    #[test]
    fn test_memory_starts_as_all_defections() {
        let memory = Memory::new(3);
        assert_eq!(memory.index(), 0);
        assert_eq!(memory.moves(), vec![false; 3]);
    }

    #[test]
    fn test_memory_push_matches_sliding_window() {
        let history = [
            true, false, true, true, false, false, true, true, true, false,
        ];
        for memory_size in 1..=4 {
            let mut memory = Memory::new(memory_size);
            let mut window: VecDeque<bool> = VecDeque::from(vec![false; memory_size as usize]);
            for &m in &history {
                memory.push(m);
                window.pop_front();
                window.push_back(m);
                let window = Vec::from(window.clone());
                assert_eq!(memory.index(), encode(&window));
                assert_eq!(memory.moves(), window);
            }
        }
    }

    #[test]
    #[should_panic(expected = "memory size must be within")]
    fn test_memory_rejects_zero_size() {
        let _ = Memory::new(0);
    }
}
