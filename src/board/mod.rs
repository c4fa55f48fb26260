//! Board data model: jumps (ladders and snakes) and the jump set that
//! defines one playable board.
//!
//! Tiles are 1-based. A jump is created transiently during generation; only the
//! accepted `JumpSet` leaves the generator, and a rendering layer maps it onto
//! tiles.

use serde::{Deserialize, Serialize};

/// Which way a jump moves the token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JumpKind {
    Ladder, // advances
    Snake,  // retreats
}

impl JumpKind {
    pub fn is_ladder(&self) -> bool {
        matches!(self, Self::Ladder)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ladder => "ladder",
            Self::Snake => "snake",
        }
    }
}

impl std::fmt::Display for JumpKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One directed link on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Jump {
    pub from: u32,
    pub to: u32,
    pub is_ladder: bool,
}

impl Jump {
    pub fn new(from: u32, to: u32, kind: JumpKind) -> Self {
        Self {
            from,
            to,
            is_ladder: kind.is_ladder(),
        }
    }

    pub fn ladder(from: u32, to: u32) -> Self {
        Self::new(from, to, JumpKind::Ladder)
    }

    pub fn snake(from: u32, to: u32) -> Self {
        Self::new(from, to, JumpKind::Snake)
    }

    pub fn kind(&self) -> JumpKind {
        if self.is_ladder {
            JumpKind::Ladder
        } else {
            JumpKind::Snake
        }
    }

    /// Tiles travelled, regardless of direction
    pub fn length(&self) -> u32 {
        self.from.abs_diff(self.to)
    }

    /// True if either endpoint is `tile`
    pub fn touches(&self, tile: u32) -> bool {
        self.from == tile || self.to == tile
    }
}

/// Ordered collection of jumps produced by one generation attempt
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JumpSet {
    jumps: Vec<Jump>,
}

impl JumpSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, jump: Jump) {
        self.jumps.push(jump);
    }

    pub fn len(&self) -> usize {
        self.jumps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jumps.is_empty()
    }

    pub fn as_slice(&self) -> &[Jump] {
        &self.jumps
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Jump> {
        self.jumps.iter()
    }

    pub fn ladders(&self) -> impl Iterator<Item = &Jump> {
        self.jumps.iter().filter(|j| j.is_ladder)
    }

    pub fn snakes(&self) -> impl Iterator<Item = &Jump> {
        self.jumps.iter().filter(|j| !j.is_ladder)
    }

    /// Sum of ladder lengths
    pub fn total_advancement(&self) -> u32 {
        self.ladders().map(Jump::length).sum()
    }

    /// Sum of snake lengths
    pub fn total_setback(&self) -> u32 {
        self.snakes().map(Jump::length).sum()
    }

    /// Jump whose mouth is at `tile`, if any
    pub fn jump_from(&self, tile: u32) -> Option<&Jump> {
        self.jumps.iter().find(|j| j.from == tile)
    }

    pub fn from_json(json: &str) -> Option<Self> {
        serde_json::from_str(json).ok()
    }
}

impl From<Vec<Jump>> for JumpSet {
    fn from(jumps: Vec<Jump>) -> Self {
        Self { jumps }
    }
}

impl AsRef<[Jump]> for JumpSet {
    fn as_ref(&self) -> &[Jump] {
        &self.jumps
    }
}

impl<'a> IntoIterator for &'a JumpSet {
    type Item = &'a Jump;
    type IntoIter = std::slice::Iter<'a, Jump>;

    fn into_iter(self) -> Self::IntoIter {
        self.jumps.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_set() -> JumpSet {
        JumpSet::from(vec![
            Jump::ladder(4, 14),
            Jump::ladder(9, 31),
            Jump::snake(17, 7),
            Jump::snake(62, 19),
        ])
    }

    #[test]
    fn test_jump_kind_roundtrip() {
        assert_eq!(Jump::ladder(2, 10).kind(), JumpKind::Ladder);
        assert_eq!(Jump::snake(10, 2).kind(), JumpKind::Snake);
        assert!(JumpKind::Ladder.is_ladder());
        assert!(!JumpKind::Snake.is_ladder());
    }

    #[test]
    fn test_jump_length_is_direction_agnostic() {
        assert_eq!(Jump::ladder(3, 20).length(), 17);
        assert_eq!(Jump::snake(20, 3).length(), 17);
    }

    #[test]
    fn test_touches() {
        let jump = Jump::ladder(5, 25);
        assert!(jump.touches(5));
        assert!(jump.touches(25));
        assert!(!jump.touches(15));
    }

    #[test]
    fn test_totals() {
        let set = sample_set();
        assert_eq!(set.total_advancement(), 10 + 22);
        assert_eq!(set.total_setback(), 10 + 43);
        assert_eq!(set.ladders().count(), 2);
        assert_eq!(set.snakes().count(), 2);
    }

    #[test]
    fn test_jump_from_lookup() {
        let set = sample_set();
        assert_eq!(set.jump_from(17).map(|j| j.to), Some(7));
        assert!(set.jump_from(7).is_none());
    }

    #[test]
    fn test_json_is_plain_triple_list() {
        let set = JumpSet::from(vec![Jump::ladder(2, 12)]);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"[{"from":2,"to":12,"is_ladder":true}]"#);
        let restored = JumpSet::from_json(&json).unwrap();
        assert_eq!(restored, set);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(JumpSet::from_json("not json").is_none());
    }
}
