use crate::foundation::core::{Argb, Point, Rect, Vec2};
use crate::foundation::error::{BlurError, BlurResult};
use crate::overlay::set::OverlayId;

/// Handle to a node in a [`SurfaceTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub(crate) u32);

/// What a node paints before its children.
#[derive(Clone, Debug, PartialEq)]
pub enum Content {
    Empty,
    Solid(Argb),
    /// Alternating square cells of `cell` size starting with `a` at the top-left.
    Checker {
        cell: f64,
        a: Argb,
        b: Argb,
    },
    /// Drawn by the overlay's own draw entry point.
    Overlay(OverlayId),
}

/// One drawable node.
#[derive(Clone, Debug)]
pub struct SurfaceNode {
    /// Bounds relative to the parent's content origin; for top-level surfaces, screen position.
    pub frame: Rect,
    /// Content offset applied to children (scrolling).
    pub scroll: Vec2,
    pub background: Option<Argb>,
    pub content: Content,
    pub visible: bool,
    pub clip_children: bool,
    parent: Option<SurfaceId>,
    owner: Option<SurfaceId>,
    children: Vec<SurfaceId>,
    root_container: bool,
    invalidations: u64,
    pre_paint: Vec<OverlayId>,
}

impl SurfaceNode {
    fn new(frame: Rect, content: Content) -> Self {
        Self {
            frame,
            scroll: Vec2::ZERO,
            background: None,
            content,
            visible: true,
            clip_children: false,
            parent: None,
            owner: None,
            children: Vec::new(),
            root_container: false,
            invalidations: 0,
            pre_paint: Vec::new(),
        }
    }

    pub fn parent(&self) -> Option<SurfaceId> {
        self.parent
    }

    /// For top-level surfaces: the surface that spawned this one.
    pub fn owner(&self) -> Option<SurfaceId> {
        self.owner
    }

    pub fn children(&self) -> &[SurfaceId] {
        &self.children
    }

    /// Recognized as the root whose content overlays capture.
    pub fn is_root_container(&self) -> bool {
        self.root_container
    }

    /// Explicit repaint requests received so far.
    pub fn invalidations(&self) -> u64 {
        self.invalidations
    }

    /// Overlays whose capture runs before this surface is painted, in registration order.
    pub fn pre_paint_hooks(&self) -> &[OverlayId] {
        &self.pre_paint
    }
}

/// Arena of surfaces: top-level surfaces (windows, popups) and their content trees.
#[derive(Clone, Debug, Default)]
pub struct SurfaceTree {
    nodes: Vec<Option<SurfaceNode>>,
    top_levels: Vec<SurfaceId>,
    // Surfaces with at least one pre-paint hook, sorted by id.
    hooked: Vec<SurfaceId>,
}

impl SurfaceTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a top-level surface at screen rectangle `frame`.
    ///
    /// `owner` links a popup to the surface it belongs to; `root_container` marks the surface whose
    /// content overlays capture.
    pub fn add_top_level(
        &mut self,
        frame: Rect,
        owner: Option<SurfaceId>,
        root_container: bool,
    ) -> SurfaceId {
        let mut node = SurfaceNode::new(frame, Content::Empty);
        node.owner = owner;
        node.root_container = root_container;
        let id = self.push(node);
        self.top_levels.push(id);
        id
    }

    /// Add `content` as the last (topmost) child of `parent`.
    pub fn add_child(
        &mut self,
        parent: SurfaceId,
        frame: Rect,
        content: Content,
    ) -> BlurResult<SurfaceId> {
        if self.node(parent).is_none() {
            return Err(BlurError::validation(format!(
                "unknown parent surface {parent:?}"
            )));
        }
        let mut node = SurfaceNode::new(frame, content);
        node.parent = Some(parent);
        let id = self.push(node);
        if let Some(p) = self.node_mut(parent) {
            p.children.push(id);
        }
        Ok(id)
    }

    /// Remove `id` and its whole subtree.
    pub fn remove(&mut self, id: SurfaceId) {
        let Some(node) = self.node(id) else {
            return;
        };
        if let Some(parent) = node.parent
            && let Some(p) = self.node_mut(parent)
        {
            p.children.retain(|&c| c != id);
        }
        self.top_levels.retain(|&t| t != id);

        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            if let Some(node) = self.nodes.get_mut(cur.0 as usize).and_then(Option::take) {
                if !node.pre_paint.is_empty()
                    && let Ok(i) = self.hooked.binary_search(&cur)
                {
                    self.hooked.remove(i);
                }
                stack.extend(node.children);
            }
        }
    }

    pub fn node(&self, id: SurfaceId) -> Option<&SurfaceNode> {
        self.nodes.get(id.0 as usize).and_then(Option::as_ref)
    }

    pub fn node_mut(&mut self, id: SurfaceId) -> Option<&mut SurfaceNode> {
        self.nodes.get_mut(id.0 as usize).and_then(Option::as_mut)
    }

    /// Top-level surfaces in stacking order, bottom first.
    pub fn top_levels(&self) -> &[SurfaceId] {
        &self.top_levels
    }

    /// Move a node; `origin` is relative to its parent (screen position for top-level surfaces).
    pub fn set_origin(&mut self, id: SurfaceId, origin: Point) {
        if let Some(n) = self.node_mut(id) {
            n.frame = Rect::from_origin_size(origin, n.frame.size());
        }
    }

    pub fn set_scroll(&mut self, id: SurfaceId, scroll: Vec2) {
        if let Some(n) = self.node_mut(id) {
            n.scroll = scroll;
        }
    }

    pub fn set_visible(&mut self, id: SurfaceId, visible: bool) {
        if let Some(n) = self.node_mut(id) {
            n.visible = visible;
        }
    }

    /// Ask for `id` to be repainted.
    pub fn invalidate(&mut self, id: SurfaceId) {
        if let Some(n) = self.node_mut(id) {
            n.invalidations = n.invalidations.saturating_add(1);
        }
    }

    /// The top-level surface containing `id` (itself if it is top-level).
    pub fn top_level(&self, id: SurfaceId) -> Option<SurfaceId> {
        let mut cur = id;
        // Bounded by the arena size so a malformed parent cycle can't spin forever.
        for _ in 0..=self.nodes.len() {
            match self.node(cur)?.parent {
                Some(parent) => cur = parent,
                None => return Some(cur),
            }
        }
        None
    }

    /// Find the root container for `start`: its own top-level surface, or one reached from it
    /// through at most `max_hops` owner links.
    pub fn find_root_container(&self, start: SurfaceId, max_hops: usize) -> Option<SurfaceId> {
        let mut cur = self.top_level(start)?;
        let mut hops = 0;
        loop {
            let node = self.node(cur)?;
            if node.root_container {
                return Some(cur);
            }
            if hops == max_hops {
                return None;
            }
            cur = node.owner?;
            hops += 1;
        }
    }

    /// Screen position of the node's top-left corner.
    pub fn location_on_screen(&self, id: SurfaceId) -> Option<Point> {
        let mut pos = Vec2::ZERO;
        let mut cur = id;
        for _ in 0..=self.nodes.len() {
            let node = self.node(cur)?;
            pos += node.frame.origin().to_vec2();
            match node.parent {
                Some(parent) => {
                    pos -= self.node(parent)?.scroll;
                    cur = parent;
                }
                None => return Some(pos.to_point()),
            }
        }
        None
    }

    /// Node size rounded to whole device pixels.
    pub fn size_px(&self, id: SurfaceId) -> (u32, u32) {
        self.node(id).map_or((0, 0), |n| {
            (
                n.frame.width().max(0.0).round() as u32,
                n.frame.height().max(0.0).round() as u32,
            )
        })
    }

    /// The node and every ancestor are visible.
    pub fn is_shown(&self, id: SurfaceId) -> bool {
        let mut cur = id;
        for _ in 0..=self.nodes.len() {
            let Some(node) = self.node(cur) else {
                return false;
            };
            if !node.visible {
                return false;
            }
            match node.parent {
                Some(parent) => cur = parent,
                None => return true,
            }
        }
        false
    }

    pub(crate) fn add_pre_paint_hook(&mut self, id: SurfaceId, overlay: OverlayId) {
        let Some(n) = self.node_mut(id) else {
            return;
        };
        if n.pre_paint.contains(&overlay) {
            return;
        }
        n.pre_paint.push(overlay);
        if let Err(i) = self.hooked.binary_search(&id) {
            self.hooked.insert(i, id);
        }
    }

    pub(crate) fn remove_pre_paint_hook(&mut self, id: SurfaceId, overlay: OverlayId) -> bool {
        let Some(n) = self.node_mut(id) else {
            return false;
        };
        let before = n.pre_paint.len();
        n.pre_paint.retain(|&o| o != overlay);
        let removed = n.pre_paint.len() != before;
        if n.pre_paint.is_empty()
            && let Ok(i) = self.hooked.binary_search(&id)
        {
            self.hooked.remove(i);
        }
        removed
    }

    /// Surfaces carrying pre-paint hooks, in creation order.
    pub(crate) fn hooked_surfaces(&self) -> &[SurfaceId] {
        &self.hooked
    }

    /// Every registered pre-paint hook as `(surface, overlay)`, surfaces in creation order.
    ///
    /// Only hooked surfaces are visited, not the whole arena.
    pub(crate) fn pre_paint_hooks(&self) -> Vec<(SurfaceId, OverlayId)> {
        self.hooked
            .iter()
            .filter_map(|&id| self.node(id).map(|n| (id, n)))
            .flat_map(|(id, n)| n.pre_paint.iter().map(move |&o| (id, o)))
            .collect()
    }

    fn push(&mut self, node: SurfaceNode) -> SurfaceId {
        let id = SurfaceId(self.nodes.len() as u32);
        self.nodes.push(Some(node));
        id
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/surface.rs"]
mod tests;
