/// Selection state over box handles. Holds ids into the box collection,
/// never the boxes themselves. The multi set is populated only by
/// select-all; an ordinary click collapses it to a single primary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    primary: Option<u64>,
    multi: Vec<u64>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn primary(&self) -> Option<u64> {
        self.primary
    }

    pub fn multi(&self) -> &[u64] {
        &self.multi
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_none() && self.multi.is_empty()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.primary == Some(id) || self.multi.contains(&id)
    }

    pub fn set_primary(&mut self, id: u64) {
        self.primary = Some(id);
        self.multi.clear();
    }

    pub fn select_all(&mut self, ids: Vec<u64>) {
        self.primary = ids.first().copied();
        self.multi = ids;
    }

    pub fn clear(&mut self) {
        self.primary = None;
        self.multi.clear();
    }

    pub fn remove(&mut self, id: u64) {
        if self.primary == Some(id) {
            self.primary = None;
        }
        self.multi.retain(|selected| *selected != id);
    }

    /// Drop ids whose boxes no longer exist.
    pub fn retain_existing(&mut self, exists: impl Fn(u64) -> bool) {
        if let Some(primary) = self.primary {
            if !exists(primary) {
                self.primary = None;
            }
        }
        self.multi.retain(|id| exists(*id));
    }

    /// The ids clipboard operations act on: the multi set when populated,
    /// otherwise the primary selection alone.
    pub fn effective(&self) -> Vec<u64> {
        if !self.multi.is_empty() {
            self.multi.clone()
        } else {
            self.primary.into_iter().collect()
        }
    }
}
