//! Playlist: append-only doubly-linked track list with a cursor
//!
//! Nodes live in an arena owned by the playlist; `prev`/`next` links are
//! arena indices, so they never own the node they point at.
//!
//! Invariants:
//! - `head`, `tail` and `cursor` are all `None` iff the playlist is empty
//! - following `next` from `head` reaches `tail` in `len() - 1` steps, and
//!   `prev` from `tail` reaches `head` the same way
//! - `cursor` always names a node reachable from `head`

use super::track::Track;

/// Handle to a node in a [`Playlist`]
///
/// Nodes are never removed, so a handle stays valid for the life of the
/// playlist that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Insertion index of the node
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
struct Node {
    track: Track,
    prev: Option<NodeId>,
    next: Option<NodeId>,
}

/// Ordered sequence of tracks with a movable cursor
#[derive(Debug, Clone, Default)]
pub struct Playlist {
    nodes: Vec<Node>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    cursor: Option<NodeId>,
}

impl Playlist {
    /// Create new empty playlist
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a track after the current tail
    ///
    /// The first track appended becomes head, tail and cursor at once.
    pub fn append(&mut self, track: Track) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            track,
            prev: self.tail,
            next: None,
        });

        match self.tail {
            Some(tail) => self.nodes[tail.0].next = Some(id),
            None => {
                self.head = Some(id);
                self.cursor = Some(id);
            }
        }
        self.tail = Some(id);
        id
    }

    /// Move the cursor to the following node
    ///
    /// Returns `false` without moving when the cursor is on the tail (or the
    /// playlist is empty); what happens at the end is up to the caller.
    pub fn step_forward(&mut self) -> bool {
        match self.cursor.and_then(|c| self.nodes[c.0].next) {
            Some(next) => {
                self.cursor = Some(next);
                true
            }
            None => false,
        }
    }

    /// Move the cursor to the preceding node
    ///
    /// At the head the cursor resets to head and `false` is returned.
    pub fn step_backward(&mut self) -> bool {
        match self.cursor.and_then(|c| self.nodes[c.0].prev) {
            Some(prev) => {
                self.cursor = Some(prev);
                true
            }
            None => {
                self.cursor = self.head;
                false
            }
        }
    }

    /// Put the cursor back on the first track
    pub fn reset_to_head(&mut self) {
        self.cursor = self.head;
    }

    /// Track under the cursor, `None` when empty
    pub fn current_track(&self) -> Option<&Track> {
        self.cursor.map(|c| &self.nodes[c.0].track)
    }

    /// Whether the cursor node has a successor
    pub fn has_next(&self) -> bool {
        self.cursor.is_some_and(|c| self.nodes[c.0].next.is_some())
    }

    pub fn head(&self) -> Option<NodeId> {
        self.head
    }

    pub fn tail(&self) -> Option<NodeId> {
        self.tail
    }

    pub fn cursor(&self) -> Option<NodeId> {
        self.cursor
    }

    /// Zero-based position of the cursor in playback order
    pub fn cursor_position(&self) -> Option<usize> {
        // Append-only: arena order equals link order
        self.cursor.map(NodeId::index)
    }

    pub fn track(&self, id: NodeId) -> Option<&Track> {
        self.nodes.get(id.0).map(|n| &n.track)
    }

    pub fn next_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|n| n.next)
    }

    pub fn prev_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|n| n.prev)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Walk `next` links from head
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            playlist: self,
            node: self.head,
            forward: true,
        }
    }

    /// Walk `prev` links from tail
    pub fn iter_rev(&self) -> Iter<'_> {
        Iter {
            playlist: self,
            node: self.tail,
            forward: false,
        }
    }
}

/// Link-following iterator over a [`Playlist`]
pub struct Iter<'a> {
    playlist: &'a Playlist,
    node: Option<NodeId>,
    forward: bool,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Track;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.node?;
        let node = &self.playlist.nodes[id.0];
        self.node = if self.forward { node.next } else { node.prev };
        Some(&node.track)
    }
}

impl<'a> IntoIterator for &'a Playlist {
    type Item = &'a Track;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Track> for Playlist {
    fn from_iter<I: IntoIterator<Item = Track>>(iter: I) -> Self {
        let mut playlist = Playlist::new();
        for track in iter {
            playlist.append(track);
        }
        playlist
    }
}
