//! Layout graph: the played bones as an undirected graph over pip values.
//!
//! Each played bone is one edge between its two values; a double is a
//! self-loop. Bones are unique, so a bitmask adjacency set per vertex is a
//! faithful representation. The open ends fall out of degree parity: a
//! connected edge set with zero or two odd-incidence vertices is exactly an
//! edge set that can be walked as one trail, and the odd vertices are the
//! trail's two ends.

use super::bone::{Bone, PIP_VALUES};
use super::error::{EngineError, EngineResult};

/// Open ends derived from a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenEnds {
    /// Nothing played yet; any bone may start the chain.
    Start,
    /// The two exposed values, lower first. Equal values are allowed.
    Pair(u8, u8),
    /// All incidences are even and more than one value is touched: the
    /// chain closed on itself and the end value cannot be read off the graph.
    Closed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    /// Bit `w` of `adjacency[v]` is set when a bone `v|w` has been played.
    adjacency: [u8; PIP_VALUES],
    edges: usize,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a layout from an unordered collection of played bones.
    pub fn from_bones<'a, I>(bones: I) -> EngineResult<Self>
    where
        I: IntoIterator<Item = &'a Bone>,
    {
        let mut layout = Self::new();
        for bone in bones {
            layout.insert(*bone)?;
        }
        Ok(layout)
    }

    pub fn insert(&mut self, bone: Bone) -> EngineResult<()> {
        if self.contains(bone) {
            return Err(EngineError::malformed(format!(
                "bone {:#} appears more than once on the table",
                bone
            )));
        }
        let (a, b) = bone.key();
        self.adjacency[a as usize] |= 1 << b;
        self.adjacency[b as usize] |= 1 << a;
        self.edges += 1;
        Ok(())
    }

    #[inline]
    pub fn contains(&self, bone: Bone) -> bool {
        let (a, b) = bone.key();
        self.adjacency[a as usize] & (1 << b) != 0
    }

    pub fn len(&self) -> usize {
        self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.edges == 0
    }

    /// Number of edge endpoints at `value`; a double counts twice.
    pub fn incidence(&self, value: u8) -> u32 {
        let mask = self.adjacency[value as usize];
        let self_loop = mask & (1 << value) != 0;
        let others = (mask & !(1 << value)).count_ones();
        if self_loop {
            others + 2
        } else {
            others
        }
    }

    fn touched(&self) -> impl Iterator<Item = u8> + '_ {
        (0..PIP_VALUES as u8).filter(|&v| self.adjacency[v as usize] != 0)
    }

    fn is_connected(&self) -> bool {
        let Some(first) = self.touched().next() else {
            return true;
        };
        let mut seen: u8 = 1 << first;
        let mut frontier: u8 = seen;
        while frontier != 0 {
            let v = frontier.trailing_zeros() as usize;
            frontier &= frontier - 1;
            let fresh = self.adjacency[v] & !seen;
            seen |= fresh;
            frontier |= fresh;
        }
        self.touched().all(|v| seen & (1 << v) != 0)
    }

    /// Derive the open ends from the unordered edge set.
    pub fn open_ends(&self) -> EngineResult<OpenEnds> {
        if self.is_empty() {
            return Ok(OpenEnds::Start);
        }
        if !self.is_connected() {
            return Err(EngineError::invalid_layout(
                "played bones do not form a single connected chain",
            ));
        }

        let odd: Vec<u8> = (0..PIP_VALUES as u8)
            .filter(|&v| self.incidence(v) % 2 == 1)
            .collect();

        match odd.as_slice() {
            [a, b] => Ok(OpenEnds::Pair(*a, *b)),
            [] => {
                let mut touched = self.touched();
                match (touched.next(), touched.next()) {
                    (Some(v), None) => Ok(OpenEnds::Pair(v, v)),
                    _ => Ok(OpenEnds::Closed),
                }
            }
            _ => Err(EngineError::invalid_layout(format!(
                "{} values have an odd number of played ends; a chain has at most two",
                odd.len()
            ))),
        }
    }
}
