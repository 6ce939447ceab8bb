//! Output sinks receiving the hypotheses accepted by a search round.

use std::collections::BTreeMap;

use crate::edge::PartialEdge;
use crate::types::Note;

/// Consumer of accepted hypotheses.
///
/// `new_hypothesis` is called once per accepted edge in emission order;
/// `finished_search` exactly once per round, after the last hypothesis.
pub trait HypothesisSink {
    fn new_hypothesis(&mut self, edge: PartialEdge, note: Note);

    fn finished_search(&mut self);
}

impl<S: HypothesisSink + ?Sized> HypothesisSink for &mut S {
    fn new_hypothesis(&mut self, edge: PartialEdge, note: Note) {
        (**self).new_hypothesis(edge, note)
    }

    fn finished_search(&mut self) {
        (**self).finished_search()
    }
}

/// One accepted hypothesis as seen by a sink.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Emission {
    pub edge: PartialEdge,
    pub note: Note,
}

/// Sink that records every emission and completion signal.
#[derive(Clone, Debug, Default)]
pub struct Collector {
    emissions: Vec<Emission>,
    finished: usize,
    /// Emissions recorded when `finished_search` was last called.
    emitted_at_finish: Option<usize>,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emissions(&self) -> &[Emission] {
        &self.emissions
    }

    pub fn edges(&self) -> impl Iterator<Item = PartialEdge> + '_ {
        self.emissions.iter().map(|e| e.edge)
    }

    pub fn notes(&self) -> impl Iterator<Item = Note> + '_ {
        self.emissions.iter().map(|e| e.note)
    }

    /// How many times `finished_search` has been called.
    pub fn finished(&self) -> usize {
        self.finished
    }

    /// Whether every emission so far arrived before the last completion signal.
    pub fn finished_last(&self) -> bool {
        self.emitted_at_finish == Some(self.emissions.len())
    }

    pub fn len(&self) -> usize {
        self.emissions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emissions.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl HypothesisSink for Collector {
    fn new_hypothesis(&mut self, edge: PartialEdge, note: Note) {
        self.emissions.push(Emission { edge, note });
    }

    fn finished_search(&mut self) {
        self.finished += 1;
        self.emitted_at_finish = Some(self.emissions.len());
    }
}

/// Routes hypotheses to per-key sinks, e.g. one vertex per left-hand-side
/// label.
///
/// Sinks are created on first use. `finished_search` is forwarded once to
/// every sink created so far.
pub struct RoutingSink<K, S, R, M> {
    route: R,
    make: M,
    sinks: BTreeMap<K, S>,
}

impl<K, S, R, M> RoutingSink<K, S, R, M>
where
    K: Ord,
    S: HypothesisSink,
    R: FnMut(Note) -> K,
    M: FnMut(&K) -> S,
{
    /// `route` picks the key for a note; `make` builds the sink for a new key.
    pub fn new(route: R, make: M) -> Self {
        Self {
            route,
            make,
            sinks: BTreeMap::new(),
        }
    }

    pub fn get(&self, key: &K) -> Option<&S> {
        self.sinks.get(key)
    }

    pub fn sinks(&self) -> impl Iterator<Item = (&K, &S)> {
        self.sinks.iter()
    }

    pub fn into_sinks(self) -> BTreeMap<K, S> {
        self.sinks
    }
}

impl<K, S, R, M> HypothesisSink for RoutingSink<K, S, R, M>
where
    K: Ord,
    S: HypothesisSink,
    R: FnMut(Note) -> K,
    M: FnMut(&K) -> S,
{
    fn new_hypothesis(&mut self, edge: PartialEdge, note: Note) {
        let key = (self.route)(note);
        let make = &mut self.make;
        self.sinks
            .entry(key)
            .or_insert_with_key(|key| make(key))
            .new_hypothesis(edge, note);
    }

    fn finished_search(&mut self) {
        for sink in self.sinks.values_mut() {
            sink.finished_search();
        }
    }
}
