use crate::flight::Flight;
use std::cmp::Ordering;

struct Node {
    flight: Flight,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

impl Node {
    fn leaf(flight: Flight) -> Self {
        Node {
            flight,
            left: None,
            right: None,
        }
    }
}

/// Binary search tree over flights, keyed by flight id.
///
/// There is no removal; callers rebuild from the live record set instead.
#[derive(Default)]
pub struct OrderedIndex {
    root: Option<Box<Node>>,
    len: usize,
}

impl OrderedIndex {
    pub fn from_records<'a>(flights: impl IntoIterator<Item = &'a Flight>) -> Self {
        let mut index = OrderedIndex::default();
        flights.into_iter().for_each(|f| {
            index.insert(f.clone());
        });
        index
    }

    /// Returns `false` and leaves the tree untouched if the id is already present.
    pub fn insert(&mut self, flight: Flight) -> bool {
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = match flight.id.cmp(&node.flight.id) {
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
                Ordering::Equal => return false,
            };
        }
        *slot = Some(Box::new(Node::leaf(flight)));
        self.len += 1;
        true
    }

    /// Flights in ascending id order.
    pub fn inorder(&self) -> Vec<&Flight> {
        let mut out = Vec::with_capacity(self.len);
        // explicit stack: ids arrive ascending, so the tree is usually a right spine
        let mut pending: Vec<&Node> = Vec::new();
        let mut current = self.root.as_deref();
        while current.is_some() || !pending.is_empty() {
            while let Some(node) = current {
                pending.push(node);
                current = node.left.as_deref();
            }
            if let Some(node) = pending.pop() {
                out.push(&node.flight);
                current = node.right.as_deref();
            }
        }
        out
    }

    pub fn len(&self) -> usize {
        self.len
    }
}

impl Drop for OrderedIndex {
    fn drop(&mut self) {
        // unlink iteratively; the default recursive drop overflows on a long spine
        let mut pending: Vec<Box<Node>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}
