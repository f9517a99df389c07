//! Random interaction matrices drawn over a fixed interaction topology.

use glv_core::error::ensure_len;
use glv_core::{GlvError, GlvResult};
use nalgebra::DMatrix;
use rand::Rng;
use rand_distr::Exp1;

/// Square adjacency pattern: `edge(i, j)` means species j acts on species i.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InteractionTemplate {
    n: usize,
    edges: Vec<bool>,
}

impl InteractionTemplate {
    /// Template with no off-diagonal interactions.
    pub fn empty(n: usize) -> GlvResult<Self> {
        if n == 0 {
            return Err(GlvError::InvalidArgument {
                what: "template must have at least one species",
            });
        }
        Ok(Self {
            n,
            edges: vec![false; n * n],
        })
    }

    /// Build from rows of 0/1 flags; any non-zero entry is an edge.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> GlvResult<Self> {
        let n = rows.len();
        let mut template = Self::empty(n)?;
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            ensure_len("template row", n, row.len())?;
            for (j, &flag) in row.iter().enumerate() {
                template.edges[i * n + j] = flag != 0;
            }
        }
        Ok(template)
    }

    /// Build from a row-major buffer of n² flags.
    pub fn from_flat(flags: &[u8], n: usize) -> GlvResult<Self> {
        let mut template = Self::empty(n)?;
        ensure_len("template entries", n * n, flags.len())?;
        for (edge, &flag) in template.edges.iter_mut().zip(flags) {
            *edge = flag != 0;
        }
        Ok(template)
    }

    pub fn n(&self) -> usize {
        self.n
    }

    /// Row-major slot of (i, j); both indices must be below n.
    fn slot(&self, i: usize, j: usize) -> GlvResult<usize> {
        for index in [i, j] {
            if index >= self.n {
                return Err(GlvError::IndexOob {
                    what: "template species",
                    index,
                    len: self.n,
                });
            }
        }
        Ok(i * self.n + j)
    }

    pub fn edge(&self, i: usize, j: usize) -> GlvResult<bool> {
        Ok(self.edges[self.slot(i, j)?])
    }

    pub fn set_edge(&mut self, i: usize, j: usize, present: bool) -> GlvResult<()> {
        let slot = self.slot(i, j)?;
        self.edges[slot] = present;
        Ok(())
    }

    /// Off-diagonal (i, j) pairs carrying an edge, in row-major order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(|&(_, &present)| present)
            .map(|(slot, _)| (slot / self.n, slot % self.n))
            .filter(|&(i, j)| i != j)
    }

    /// Number of off-diagonal edges.
    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }
}

/// Sampler for interaction matrices over a template.
///
/// Diagonal entries are fixed at `self_regulation`. Off-diagonal entries on
/// a template edge are `scale * e` with `e ~ Exp(1)`; all others are zero.
/// The negative defaults give self-limited, mutually competing species.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RandomInteractions {
    pub self_regulation: f64,
    pub scale: f64,
}

impl Default for RandomInteractions {
    fn default() -> Self {
        Self {
            self_regulation: -1.0,
            scale: -1.0,
        }
    }
}

impl RandomInteractions {
    pub fn sample<R: Rng>(&self, template: &InteractionTemplate, rng: &mut R) -> DMatrix<f64> {
        let n = template.n();
        let mut a = DMatrix::from_diagonal_element(n, n, self.self_regulation);
        for (i, j) in template.edges() {
            let e: f64 = rng.sample(Exp1);
            a[(i, j)] = self.scale * e;
        }
        a
    }
}
