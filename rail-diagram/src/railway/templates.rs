//! Ruler and forbid templates.
//!
//! A template is a railway-level header (`Ruler` or `Forbid`) plus one node
//! per interval, stored positionally in each interval at the template's
//! index. Adding or removing a template therefore touches every interval.

use tracing::debug;

use super::Railway;
use crate::domain::{
    Direction, Forbid, ForbidNode, IntervalId, RailError, Ruler, RulerNode, StationId,
    StationName,
};

impl Railway {
    /// Number of rulers.
    pub fn ruler_count(&self) -> usize {
        self.rulers.len()
    }

    /// Rulers in index order.
    pub fn rulers(&self) -> impl Iterator<Item = RulerView<'_>> + '_ {
        self.rulers.iter().map(|ruler| RulerView {
            railway: self,
            ruler,
        })
    }

    /// The ruler at `index`.
    pub fn ruler(&self, index: usize) -> Option<RulerView<'_>> {
        let ruler = self.rulers.get(index)?;
        Some(RulerView {
            railway: self,
            ruler,
        })
    }

    /// Ruler header for in-place edits of its free attributes.
    pub fn ruler_mut(&mut self, index: usize) -> Option<&mut Ruler> {
        self.rulers.get_mut(index)
    }

    /// The ruler called `name`; never matches an empty name.
    pub fn ruler_by_name(&self, name: &str) -> Option<RulerView<'_>> {
        if name.is_empty() {
            return None;
        }
        let index = self.rulers.iter().position(|r| r.name == name)?;
        self.ruler(index)
    }

    /// True if another ruler (other than `ignore`) is called `name`.
    pub fn ruler_name_existed(&self, name: &str, ignore: Option<usize>) -> bool {
        self.rulers
            .iter()
            .any(|r| r.name == name && Some(r.index) != ignore)
    }

    /// Add a ruler with a null node on every interval.
    ///
    /// # Errors
    ///
    /// [`RailError::DuplicateRuler`] if the name is taken.
    pub fn add_empty_ruler(&mut self, name: &str, different: bool) -> Result<usize, RailError> {
        if self.ruler_name_existed(name, None) {
            return Err(RailError::DuplicateRuler(name.to_string()));
        }
        let index = self.rulers.len();
        self.rulers
            .push(Ruler::new(name.to_string(), different, index));
        for (_, interval) in self.intervals.iter_mut() {
            interval.ruler_nodes.push(RulerNode::default());
        }
        debug!(ruler = name, index, "added ruler");
        Ok(index)
    }

    /// Remove a ruler and its slot on every interval.
    ///
    /// Later rulers move down one index. The ordinate follows its ruler,
    /// and is reset if it was the one removed.
    pub fn remove_ruler(&mut self, index: usize) -> Result<Ruler, RailError> {
        if index >= self.rulers.len() {
            return Err(RailError::RulerNotFound(format!("#{index}")));
        }
        let removed = self.rulers.remove(index);
        for ruler in &mut self.rulers[index..] {
            ruler.index -= 1;
        }
        for (_, interval) in self.intervals.iter_mut() {
            interval.ruler_nodes.remove(index);
        }
        self.ordinate = match self.ordinate {
            Some(o) if o == index => None,
            Some(o) if o > index => Some(o - 1),
            other => other,
        };
        debug!(ruler = %removed.name, index, "removed ruler");
        Ok(removed)
    }

    /// Rename a ruler.
    ///
    /// # Errors
    ///
    /// - [`RailError::RulerNotFound`] for a bad index
    /// - [`RailError::DuplicateRuler`] if another ruler has the name
    pub fn rename_ruler(&mut self, index: usize, name: &str) -> Result<(), RailError> {
        if index >= self.rulers.len() {
            return Err(RailError::RulerNotFound(format!("#{index}")));
        }
        if self.ruler_name_existed(name, Some(index)) {
            return Err(RailError::DuplicateRuler(name.to_string()));
        }
        self.rulers[index].name = name.to_string();
        Ok(())
    }

    /// Remove every ruler and reset the ordinate.
    pub fn clear_rulers(&mut self) {
        self.rulers.clear();
        self.ordinate = None;
        for (_, interval) in self.intervals.iter_mut() {
            interval.ruler_nodes.clear();
        }
    }

    /// The node of `ruler` on the interval from `from` to `to` (exact names).
    pub fn ruler_node_between_mut(
        &mut self,
        ruler: usize,
        from: &StationName,
        to: &StationName,
    ) -> Option<&mut RulerNode> {
        let id = self.find_interval(from, to)?;
        self.intervals[id.0].ruler_nodes.get_mut(ruler)
    }

    /// Fill null up-direction nodes of `ruler` from the down node of the
    /// same station pair, for rulers that do not distinguish directions.
    pub(crate) fn mirror_ruler_up_nodes(&mut self, ruler: usize) {
        for (up, down) in self.reverse_pairs() {
            let node = self.intervals[down.0].ruler_nodes[ruler];
            let slot = &mut self.intervals[up.0].ruler_nodes[ruler];
            if slot.is_null() {
                *slot = node;
            }
        }
    }

    /// Number of forbids.
    pub fn forbid_count(&self) -> usize {
        self.forbids.len()
    }

    /// Forbids in index order.
    pub fn forbids(&self) -> impl Iterator<Item = ForbidView<'_>> + '_ {
        self.forbids.iter().map(|forbid| ForbidView {
            railway: self,
            forbid,
        })
    }

    /// The forbid at `index`.
    pub fn forbid(&self, index: usize) -> Option<ForbidView<'_>> {
        let forbid = self.forbids.get(index)?;
        Some(ForbidView {
            railway: self,
            forbid,
        })
    }

    /// Forbid header for toggling `different` and the display flags.
    pub fn forbid_mut(&mut self, index: usize) -> Option<&mut Forbid> {
        self.forbids.get_mut(index)
    }

    /// Add a forbid with a null node on every interval.
    ///
    /// Railways conventionally carry two forbids; nothing here enforces it.
    pub fn add_empty_forbid(&mut self, different: bool) -> usize {
        let index = self.forbids.len();
        self.forbids.push(Forbid::new(different, index));
        for (_, interval) in self.intervals.iter_mut() {
            interval.forbid_nodes.push(ForbidNode::default());
        }
        index
    }

    /// Remove a forbid and its slot on every interval; later forbids move down one index.
    pub fn remove_forbid(&mut self, index: usize) -> Result<Forbid, RailError> {
        if index >= self.forbids.len() {
            return Err(RailError::ForbidNotFound(index));
        }
        let removed = self.forbids.remove(index);
        for forbid in &mut self.forbids[index..] {
            forbid.index -= 1;
        }
        for (_, interval) in self.intervals.iter_mut() {
            interval.forbid_nodes.remove(index);
        }
        Ok(removed)
    }

    /// Remove every forbid.
    pub fn clear_forbids(&mut self) {
        self.forbids.clear();
        for (_, interval) in self.intervals.iter_mut() {
            interval.forbid_nodes.clear();
        }
    }

    /// The node of `forbid` on the interval from `from` to `to` (exact names).
    pub fn forbid_node_between_mut(
        &mut self,
        forbid: usize,
        from: &StationName,
        to: &StationName,
    ) -> Option<&mut ForbidNode> {
        let id = self.find_interval(from, to)?;
        self.intervals[id.0].forbid_nodes.get_mut(forbid)
    }

    pub(crate) fn mirror_forbid_up_nodes(&mut self, forbid: usize) {
        for (up, down) in self.reverse_pairs() {
            let node = self.intervals[down.0].forbid_nodes[forbid];
            let slot = &mut self.intervals[up.0].forbid_nodes[forbid];
            if slot.is_null() {
                *slot = node;
            }
        }
    }

    /// Up intervals paired with the down interval joining the same two
    /// stations the other way.
    fn reverse_pairs(&self) -> Vec<(IntervalId, IntervalId)> {
        self.interval_chain(Direction::Up)
            .filter_map(|up| {
                let it = self.it(up);
                let down = self.st(it.to).down_next?;
                (self.it(down).to == it.from).then_some((up, down))
            })
            .collect()
    }

    /// The ruler used for layout, if any.
    pub fn ordinate(&self) -> Option<RulerView<'_>> {
        self.ruler(self.ordinate?)
    }

    /// Select the layout ruler by index, or clear it with `None`.
    pub fn set_ordinate(&mut self, index: Option<usize>) -> Result<(), RailError> {
        if let Some(i) = index {
            if i >= self.rulers.len() {
                return Err(RailError::RulerNotFound(format!("#{i}")));
            }
        }
        self.ordinate = index;
        Ok(())
    }

    /// Select the layout ruler by name.
    pub fn set_ordinate_by_name(&mut self, name: &str) -> Result<(), RailError> {
        let index = self
            .ruler_by_name(name)
            .map(|r| r.index())
            .ok_or_else(|| RailError::RulerNotFound(name.to_string()))?;
        self.ordinate = Some(index);
        Ok(())
    }

    /// Fall back to mileage layout.
    pub fn reset_ordinate(&mut self) {
        self.ordinate = None;
    }
}

/// A ruler together with the railway whose intervals hold its nodes.
#[derive(Debug, Clone, Copy)]
pub struct RulerView<'a> {
    railway: &'a Railway,
    ruler: &'a Ruler,
}

impl<'a> RulerView<'a> {
    /// The ruler's name.
    pub fn name(&self) -> &'a str {
        &self.ruler.name
    }

    /// Whether down and up running times may differ.
    pub fn different(&self) -> bool {
        self.ruler.different
    }

    /// Position in the railway's ruler list.
    pub fn index(&self) -> usize {
        self.ruler.index
    }

    /// This ruler's nodes along one chain.
    pub fn nodes(self, dir: Direction) -> impl Iterator<Item = (IntervalId, &'a RulerNode)> + 'a {
        let railway = self.railway;
        let index = self.ruler.index;
        railway
            .interval_chain(dir)
            .map(move |id| (id, &railway.it(id).ruler_nodes[index]))
    }

    /// Node on the first down interval.
    pub fn first_down_node(&self) -> Option<(IntervalId, &'a RulerNode)> {
        self.nodes(Direction::Down).next()
    }

    /// Node on the first up interval.
    pub fn first_up_node(&self) -> Option<(IntervalId, &'a RulerNode)> {
        self.nodes(Direction::Up).next()
    }

    /// The node on the interval joining two exactly named stations.
    pub fn node_between(&self, from: &StationName, to: &StationName) -> Option<&'a RulerNode> {
        let id = self.railway.find_interval(from, to)?;
        self.railway.it(id).ruler_nodes.get(self.ruler.index)
    }

    /// Sum of pass-through seconds from `from` to `to` along the `dir`
    /// chain.
    ///
    /// `None` if the chain ends before `to`, a node on the way is null, or
    /// the sum overflows.
    pub fn total_interval(&self, from: StationId, to: StationId, dir: Direction) -> Option<u32> {
        let railway = self.railway;
        let mut total: u32 = 0;
        let mut cur = from;
        while cur != to {
            let id = railway.st(cur).dir_next(dir)?;
            let interval = railway.it(id);
            let node = &interval.ruler_nodes[self.ruler.index];
            if node.is_null() {
                return None;
            }
            total = total.checked_add(node.interval)?;
            cur = interval.to;
        }
        Some(total)
    }

    /// True if no interval on either chain has a null node.
    pub fn is_complete(&self) -> bool {
        [Direction::Down, Direction::Up]
            .into_iter()
            .all(|dir| self.nodes(dir).all(|(_, node)| !node.is_null()))
    }
}

/// A forbid together with the railway whose intervals hold its nodes.
#[derive(Debug, Clone, Copy)]
pub struct ForbidView<'a> {
    railway: &'a Railway,
    forbid: &'a Forbid,
}

impl<'a> ForbidView<'a> {
    /// Position in the railway's forbid list.
    pub fn index(&self) -> usize {
        self.forbid.index
    }

    /// Whether down and up windows may differ.
    pub fn different(&self) -> bool {
        self.forbid.different
    }

    /// Whether the window is drawn for down trains.
    pub fn down_show(&self) -> bool {
        self.forbid.down_show
    }

    /// Whether the window is drawn for up trains.
    pub fn up_show(&self) -> bool {
        self.forbid.up_show
    }

    /// This forbid's nodes along one chain.
    pub fn nodes(self, dir: Direction) -> impl Iterator<Item = (IntervalId, &'a ForbidNode)> + 'a {
        let railway = self.railway;
        let index = self.forbid.index;
        railway
            .interval_chain(dir)
            .map(move |id| (id, &railway.it(id).forbid_nodes[index]))
    }

    /// The node on the interval joining two exactly named stations.
    pub fn node_between(&self, from: &StationName, to: &StationName) -> Option<&'a ForbidNode> {
        let id = self.railway.find_interval(from, to)?;
        self.railway.it(id).forbid_nodes.get(self.forbid.index)
    }
}


#[cfg(test)]
mod proptests {
    use super::super::test_support::*;
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any mix of template additions and removals leaves every interval
        /// with one node per template, and the ordinate on its ruler.
        #[test]
        fn node_counts_follow_templates(
            ops in proptest::collection::vec((any::<bool>(), any::<bool>(), 0usize..5), 0..30),
        ) {
            let mut rail = both_via(&[("A", 0.0), ("B", 5.0), ("C", 9.0)]);
            let mut ordinate_name: Option<String> = None;
            for (serial, (ruler, add, index)) in ops.iter().enumerate() {
                match (ruler, add) {
                    (true, true) => {
                        let i = rail.add_empty_ruler(&format!("r{serial}"), true).unwrap();
                        if ordinate_name.is_none() {
                            rail.set_ordinate(Some(i)).unwrap();
                            ordinate_name = Some(format!("r{serial}"));
                        }
                    }
                    (true, false) => {
                        if let Ok(removed) = rail.remove_ruler(*index) {
                            if ordinate_name.as_deref() == Some(removed.name()) {
                                ordinate_name = None;
                            }
                        }
                    }
                    (false, true) => {
                        rail.add_empty_forbid(true);
                    }
                    (false, false) => {
                        let _ = rail.remove_forbid(*index);
                    }
                }
            }
            for (_, it) in rail.intervals.iter() {
                prop_assert_eq!(it.ruler_nodes().len(), rail.ruler_count());
                prop_assert_eq!(it.forbid_nodes().len(), rail.forbid_count());
            }
            for (i, forbid) in rail.forbids().enumerate() {
                prop_assert_eq!(forbid.index(), i);
            }
            let current = rail.ordinate().map(|r| r.name().to_string());
            prop_assert_eq!(current, ordinate_name);
        }
    }
}
