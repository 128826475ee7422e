use super::{DrawCmd, Layer};

/// A recorded command with its paint layer and insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub layer: Layer,
    pub order: u32,
    pub cmd: DrawCmd,
}

/// Recorded draw stream for one frame.
///
/// Items are painted by ascending layer; items on the same layer keep
/// insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_order: u32,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items, keeping capacity.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_order = 0;
    }

    #[inline]
    pub fn push(&mut self, layer: Layer, cmd: DrawCmd) {
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);
        self.items.push(DrawItem { layer, order, cmd });
    }

    /// Items in insertion order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in paint order.
    pub fn in_paint_order(&self) -> Vec<&DrawItem> {
        let mut sorted: Vec<&DrawItem> = self.items.iter().collect();
        sorted.sort_by_key(|item| (item.layer, item.order));
        sorted
    }

    /// Total primitives across all commands.
    pub fn primitive_count(&self) -> usize {
        self.items.iter().map(|i| i.cmd.primitive_count()).sum()
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::coords::ColorRgba;

    #[test]
    fn paint_order_is_layer_then_insertion() {
        let mut list = DrawList::new();
        list.push_points(Layer::SCENE, vec![Vec3::ZERO], vec![ColorRgba::white()], 2.0);
        list.push_points(Layer::BACKGROUND, vec![Vec3::X], vec![ColorRgba::black()], 2.0);
        list.push_points(Layer::SCENE, vec![Vec3::Y], vec![ColorRgba::white()], 2.0);

        let orders: Vec<u32> = list.in_paint_order().iter().map(|i| i.order).collect();
        assert_eq!(orders, [1, 0, 2]);
    }

    #[test]
    fn clear_resets_order() {
        let mut list = DrawList::new();
        list.push_points(Layer::SCENE, vec![Vec3::ZERO; 3], vec![ColorRgba::white(); 3], 1.0);
        assert_eq!(list.primitive_count(), 3);

        list.clear();
        assert!(list.is_empty());
        list.push_points(Layer::SCENE, vec![Vec3::ZERO], vec![ColorRgba::white()], 1.0);
        assert_eq!(list.items()[0].order, 0);
    }
}
