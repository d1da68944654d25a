use super::ItemMap;
use miasma_data::{Item, Point};
use std::collections::HashMap;

/// Sparse item stacks keyed by tile.
#[derive(Debug, Clone, Default)]
pub struct ItemLayer {
    width: i32,
    height: i32,
    stacks: HashMap<Point, Vec<Item>>,
}

impl ItemLayer {
    #[must_use]
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            stacks: HashMap::new(),
        }
    }

    fn inbounds(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height
    }

    /// Sum of item volumes on `p`, nested contents excluded.
    #[must_use]
    pub fn volume_at(&self, p: Point) -> i32 {
        self.items(p).iter().map(|i| i.volume).sum()
    }

    /// Total number of items in the bubble, counting nested contents.
    #[must_use]
    pub fn total_items(&self) -> usize {
        fn count(items: &[Item]) -> usize {
            items.iter().map(|i| 1 + count(&i.contents)).sum()
        }
        self.stacks.values().map(|s| count(s)).sum()
    }
}

impl ItemMap for ItemLayer {
    fn items(&self, p: Point) -> &[Item] {
        self.stacks.get(&p).map(Vec::as_slice).unwrap_or(&[])
    }

    fn stack_mut(&mut self, p: Point) -> Option<&mut Vec<Item>> {
        if !self.inbounds(p) {
            return None;
        }
        Some(self.stacks.entry(p).or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use miasma_data::Material;

    #[test]
    fn test_stacks_are_per_tile() {
        let mut items = ItemLayer::new(4, 4);
        let p = Point::new(1, 2);
        items.add_item(p, Item::new("log", Material::Wood, 8));
        items.add_item(p, Item::new("rag", Material::Cotton, 1));
        items.add_item(Point::new(9, 9), Item::new("lost", Material::Stone, 1));
        assert_eq!(items.items(p).len(), 2);
        assert_eq!(items.volume_at(p), 9);
        assert!(items.items(Point::new(0, 0)).is_empty());
        assert_eq!(items.total_items(), 2);
    }

    #[test]
    fn test_total_items_counts_contents() {
        let mut items = ItemLayer::new(2, 2);
        let bag = Item::new("bag", Material::Plastic, 2)
            .with_contents(vec![Item::new("rock", Material::Stone, 1)]);
        items.add_item(Point::new(0, 0), bag);
        assert_eq!(items.total_items(), 2);
    }
}
