// src/engine_lib/chain.rs

use super::cog::{Cog, CogId};

/// Ordered cog storage, insertion order = creation order. The front is
/// always the oldest surviving cog and the only expiry candidate. Each cog
/// gets a monotonically increasing id on insertion so parent links survive
/// front removals.
pub struct Chain {
    ids: Vec<CogId>,
    cogs: Vec<Cog>,
    next_id: u64,
}

impl Chain {
    pub fn new() -> Self {
        Self {
            ids: Vec::new(),
            cogs: Vec::new(),
            next_id: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.cogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cogs.is_empty()
    }

    pub fn push(&mut self, cog: Cog) -> CogId {
        let id = CogId(self.next_id);
        self.next_id += 1;
        self.ids.push(id);
        self.cogs.push(cog);
        id
    }

    pub fn pop_front(&mut self) -> Option<(CogId, Cog)> {
        if self.cogs.is_empty() {
            return None;
        }
        Some((self.ids.remove(0), self.cogs.remove(0)))
    }

    pub fn front(&self) -> Option<&Cog> {
        self.cogs.first()
    }

    pub fn newest(&self) -> Option<(CogId, &Cog)> {
        let id = *self.ids.last()?;
        Some((id, self.cogs.last()?))
    }

    pub fn contains(&self, id: CogId) -> bool {
        self.ids.contains(&id)
    }

    pub fn get(&self, id: CogId) -> Option<&Cog> {
        let position = self.ids.iter().position(|&i| i == id)?;
        Some(&self.cogs[position])
    }

    pub fn ids(&self) -> &[CogId] {
        &self.ids
    }

    pub fn cogs(&self) -> &[Cog] {
        &self.cogs
    }

    pub fn iter(&self) -> impl Iterator<Item = (CogId, &Cog)> + '_ {
        self.ids.iter().copied().zip(self.cogs.iter())
    }

    pub fn cogs_mut(&mut self) -> impl Iterator<Item = &mut Cog> + '_ {
        self.cogs.iter_mut()
    }
}

impl Default for Chain {
    fn default() -> Self {
        Self::new()
    }
}
