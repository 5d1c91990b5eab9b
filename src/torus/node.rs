//! Index-based links for the nodes of the toroidal structure.
//!
//! Every node (master header, column headers and item nodes) lives in a
//! single arena and refers to its four neighbors by arena index.

/// Position of a node in the arena.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct NodeId(pub(crate) usize);

impl NodeId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// The four circular links of a node.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub(crate) struct Link {
    pub(crate) left: NodeId,
    pub(crate) right: NodeId,
    pub(crate) up: NodeId,
    pub(crate) down: NodeId,
}

impl Link {
    /// A link which points back at `id` in every direction.
    pub(crate) fn self_ref(id: NodeId) -> Self {
        Link {
            left: id,
            right: id,
            up: id,
            down: id,
        }
    }
}

/// The arena of links, with the splice operations used by cover and uncover.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Links(Vec<Link>);

// NOTE: Each splice reads both neighbors before writing either of them. When
// the two neighbors are the same node (a ring of two) the writes then agree
// instead of one clobbering the other.
impl Links {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Links(Vec::with_capacity(capacity))
    }

    /// Push a new self referencing node and return its id.
    pub(crate) fn push(&mut self) -> NodeId {
        let id = NodeId(self.0.len());
        self.0.push(Link::self_ref(id));
        id
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub(crate) fn get(&self, id: NodeId) -> &Link {
        &self.0[id.index()]
    }

    #[inline]
    fn get_mut(&mut self, id: NodeId) -> &mut Link {
        &mut self.0[id.index()]
    }

    /// Unlink `id` from its horizontal ring, leaving its own links untouched.
    pub(crate) fn cover_horizontal(&mut self, id: NodeId) {
        let Link { left, right, .. } = *self.get(id);

        self.get_mut(left).right = right;
        self.get_mut(right).left = left;
    }

    /// Unlink `id` from its vertical ring, leaving its own links untouched.
    pub(crate) fn cover_vertical(&mut self, id: NodeId) {
        let Link { up, down, .. } = *self.get(id);

        self.get_mut(up).down = down;
        self.get_mut(down).up = up;
    }

    /// Relink `id` between the neighbors it still remembers horizontally.
    pub(crate) fn uncover_horizontal(&mut self, id: NodeId) {
        let Link { left, right, .. } = *self.get(id);

        self.get_mut(left).right = id;
        self.get_mut(right).left = id;
    }

    /// Relink `id` between the neighbors it still remembers vertically.
    pub(crate) fn uncover_vertical(&mut self, id: NodeId) {
        let Link { up, down, .. } = *self.get(id);

        self.get_mut(up).down = id;
        self.get_mut(down).up = id;
    }
}

macro_rules! insert_direction {
    ($name:ident, $direction:ident, $opposite:ident) => {
        /// Insert `node` next to `anchor` in the given direction, keeping
        /// the ring closed.
        pub(crate) fn $name(&mut self, anchor: NodeId, node: NodeId) {
            let neighbor = self.get(anchor).$direction;

            self.get_mut(node).$direction = neighbor;
            self.get_mut(node).$opposite = anchor;
            self.get_mut(neighbor).$opposite = node;
            self.get_mut(anchor).$direction = node;
        }
    };
}

impl Links {
    insert_direction!(insert_above, up, down);

    insert_direction!(insert_left, left, right);
}

/// Direction of travel around a ring.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    #[inline]
    fn step(self, link: &Link) -> NodeId {
        match self {
            Direction::Left => link.left,
            Direction::Right => link.right,
            Direction::Up => link.up,
            Direction::Down => link.down,
        }
    }
}

/// Iterator around a ring, starting after `original` and stopping before
/// returning to it.
#[derive(Debug, Clone)]
pub(crate) struct RingIter<'l> {
    links: &'l Links,
    original: NodeId,
    current: NodeId,
    direction: Direction,
}

impl<'l> RingIter<'l> {
    pub(crate) fn new(links: &'l Links, original: NodeId, direction: Direction) -> Self {
        RingIter {
            links,
            original,
            current: original,
            direction,
        }
    }
}

impl Iterator for RingIter<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.direction.step(self.links.get(self.current));

        if next == self.original {
            None
        } else {
            self.current = next;
            Some(next)
        }
    }
}
