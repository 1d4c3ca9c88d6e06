use std::collections::{HashMap, HashSet, VecDeque};
use std::error::Error;
use std::fmt;
use std::fmt::Display;

use bit_set::BitSet;

use flexstr::SharedStr as FlexStr;

use crate::utils::join;

// returned by least_common_ancestor() when the inputs share no ancestor,
// eg. an empty input set or a disconnected taxonomy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoCommonAncestorError {
    pub ids: Vec<FlexStr>,
}

impl Display for NoCommonAncestorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ids.is_empty() {
            write!(f, "no common ancestor: empty input set")
        } else {
            write!(f, "no common ancestor of: {}", join(&self.ids, ", "))
        }
    }
}

impl Error for NoCommonAncestorError {}

pub struct OntologyBuilder {
    ids: Vec<FlexStr>,
    index: HashMap<FlexStr, usize>,
    parents: Vec<Vec<usize>>,
}

impl OntologyBuilder {
    pub fn new() -> OntologyBuilder {
        OntologyBuilder {
            ids: vec![],
            index: HashMap::new(),
            parents: vec![],
        }
    }

    pub fn add_node(&mut self, id: FlexStr) -> usize {
        if let Some(&idx) = self.index.get(&id) {
            return idx;
        }
        let idx = self.ids.len();
        self.ids.push(id.clone());
        self.index.insert(id, idx);
        self.parents.push(vec![]);
        idx
    }

    pub fn add_edge(&mut self, child: FlexStr, parent: FlexStr) {
        let child_idx = self.add_node(child);
        let parent_idx = self.add_node(parent);
        if !self.parents[child_idx].contains(&parent_idx) {
            self.parents[child_idx].push(parent_idx);
        }
    }

    pub fn build(self) -> Ontology {
        let node_count = self.ids.len();

        // ancestor closures and depths, computed once at build time so
        // concurrent readers can share the Ontology with no locking
        let mut ancestors: Vec<Option<BitSet>> = vec![None; node_count];
        let mut depths = vec![0_usize; node_count];

        // iterative DFS, 0 = not started, 1 = in progress, 2 = done
        let mut state = vec![0_u8; node_count];

        for start in 0..node_count {
            if state[start] == 2 {
                continue;
            }
            let mut stack = vec![(start, 0_usize)];
            state[start] = 1;
            while let Some(&(node, parent_pos)) = stack.last() {
                if parent_pos < self.parents[node].len() {
                    stack.last_mut().unwrap().1 += 1;
                    let parent = self.parents[node][parent_pos];
                    match state[parent] {
                        0 => {
                            state[parent] = 1;
                            stack.push((parent, 0));
                        },
                        1 => panic!("cycle in ontology at node: {}", self.ids[parent]),
                        _ => (),
                    }
                } else {
                    let mut node_ancestors = BitSet::with_capacity(node_count);
                    let mut node_depth = 0;
                    for &parent in &self.parents[node] {
                        node_ancestors.insert(parent);
                        node_ancestors
                            .union_with(ancestors[parent].as_ref().unwrap());
                        node_depth = node_depth.max(depths[parent] + 1);
                    }
                    ancestors[node] = Some(node_ancestors);
                    depths[node] = node_depth;
                    state[node] = 2;
                    stack.pop();
                }
            }
        }

        let ancestors: Vec<BitSet> =
            ancestors.into_iter().map(Option::unwrap).collect();

        let mut descendants = vec![BitSet::with_capacity(node_count); node_count];
        for node in 0..node_count {
            for ancestor in ancestors[node].iter() {
                descendants[ancestor].insert(node);
            }
        }

        let mut children = vec![vec![]; node_count];
        for node in 0..node_count {
            for &parent in &self.parents[node] {
                children[parent].push(node);
            }
        }

        Ontology {
            ids: self.ids,
            index: self.index,
            parents: self.parents,
            children,
            ancestors,
            descendants,
            depths,
        }
    }
}

impl Default for OntologyBuilder {
    fn default() -> OntologyBuilder {
        OntologyBuilder::new()
    }
}

// a DAG of typed nodes (anatomical entities, developmental stages or
// taxa), immutable once built
pub struct Ontology {
    ids: Vec<FlexStr>,
    index: HashMap<FlexStr, usize>,
    parents: Vec<Vec<usize>>,
    children: Vec<Vec<usize>>,
    ancestors: Vec<BitSet>,
    descendants: Vec<BitSet>,
    depths: Vec<usize>,
}

impl Ontology {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &FlexStr) -> bool {
        self.index.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &FlexStr> {
        self.ids.iter()
    }

    fn idx(&self, id: &FlexStr) -> usize {
        *self.index.get(id)
            .unwrap_or_else(|| panic!("unknown ontology node: {}", id))
    }

    fn id_set(&self, indexes: impl IntoIterator<Item = usize>) -> HashSet<FlexStr> {
        indexes.into_iter().map(|idx| self.ids[idx].clone()).collect()
    }

    pub fn parents_of(&self, id: &FlexStr) -> HashSet<FlexStr> {
        self.id_set(self.parents[self.idx(id)].iter().copied())
    }

    pub fn children_of(&self, id: &FlexStr) -> HashSet<FlexStr> {
        self.id_set(self.children[self.idx(id)].iter().copied())
    }

    pub fn ancestors_of(&self, id: &FlexStr, include_self: bool) -> HashSet<FlexStr> {
        let idx = self.idx(id);
        let mut ret = self.id_set(self.ancestors[idx].iter());
        if include_self {
            ret.insert(id.clone());
        }
        ret
    }

    pub fn descendants_of(&self, id: &FlexStr, include_self: bool) -> HashSet<FlexStr> {
        let idx = self.idx(id);
        let mut ret = self.id_set(self.descendants[idx].iter());
        if include_self {
            ret.insert(id.clone());
        }
        ret
    }

    // true if ancestor_id is a proper ancestor of id
    pub fn is_ancestor_of(&self, ancestor_id: &FlexStr, id: &FlexStr) -> bool {
        self.ancestors[self.idx(id)].contains(self.idx(ancestor_id))
    }

    // longest path from a root, used to pick the deepest common ancestor
    pub fn depth_of(&self, id: &FlexStr) -> usize {
        self.depths[self.idx(id)]
    }

    // of the given elements, those that are an ancestor of at least one
    // other element, following at most max_steps edges upward
    pub fn ancestors_among_elements(&self, elements: &[FlexStr],
                                    max_steps: Option<usize>)
        -> HashSet<FlexStr>
    {
        let element_idxs: HashSet<usize> =
            elements.iter().map(|id| self.idx(id)).collect();

        let mut ret = HashSet::new();

        for &start in &element_idxs {
            match max_steps {
                None => {
                    for ancestor in self.ancestors[start].iter() {
                        if element_idxs.contains(&ancestor) {
                            ret.insert(self.ids[ancestor].clone());
                        }
                    }
                },
                Some(max_steps) => {
                    let mut seen = BitSet::with_capacity(self.ids.len());
                    let mut queue = VecDeque::new();
                    queue.push_back((start, 0_usize));
                    while let Some((node, steps)) = queue.pop_front() {
                        if steps >= max_steps {
                            continue;
                        }
                        for &parent in &self.parents[node] {
                            if seen.insert(parent) {
                                if element_idxs.contains(&parent) {
                                    ret.insert(self.ids[parent].clone());
                                }
                                queue.push_back((parent, steps + 1));
                            }
                        }
                    }
                },
            }
        }

        ret
    }

    // the common ancestor with maximum depth, ie. closest to the inputs;
    // each node counts as an ancestor of itself
    pub fn least_common_ancestor(&self, ids: &[FlexStr])
        -> Result<FlexStr, NoCommonAncestorError>
    {
        let mut id_iter = ids.iter();

        let Some(first) = id_iter.next()
        else {
            return Err(NoCommonAncestorError { ids: vec![] });
        };

        let mut common = self.ancestors[self.idx(first)].clone();
        common.insert(self.idx(first));

        for id in id_iter {
            let idx = self.idx(id);
            let mut self_inclusive = self.ancestors[idx].clone();
            self_inclusive.insert(idx);
            common.intersect_with(&self_inclusive);
        }

        // deepest wins, equal depths fall back to ID order so the result
        // is stable across runs
        common.iter()
            .map(|idx| (self.depths[idx], &self.ids[idx]))
            .max_by(|(depth_a, id_a), (depth_b, id_b)| {
                depth_a.cmp(depth_b)
                    .then_with(|| id_b.cmp(id_a))
            })
            .map(|(_, id)| id.clone())
            .ok_or_else(|| NoCommonAncestorError { ids: ids.to_vec() })
    }
}
