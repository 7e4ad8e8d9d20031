use crate::dom::tree::{NodeId, RenderTree};

const ACTIVE: &str = "active";
const HOVER: &str = "hover";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingStyle {
    /// Every item up to the chosen rank lights up.
    Star,
    /// Only the chosen face lights up.
    Smiley,
}

/// Star/smiley rating block: `[data-rating]` with `[data-rank]` items and a
/// hidden input holding the committed value.
#[derive(Debug, Clone)]
pub struct RatingControl {
    pub block: NodeId,
    pub hidden: NodeId,
    pub style: RatingStyle,
    items: Vec<(u32, NodeId)>,
}

impl RatingControl {
    pub fn attach(tree: &RenderTree, block: NodeId) -> Option<Self> {
        let style = match tree.attr(block, "data-rating")? {
            "smiley" => RatingStyle::Smiley,
            _ => RatingStyle::Star,
        };
        let hidden = tree.find_first(block, |el| {
            el.tag == "input" && el.attr("type").is_some_and(|t| t.eq_ignore_ascii_case("hidden"))
        })?;

        let mut items: Vec<(u32, NodeId)> = tree
            .find_all(block, |el| el.attr("data-rank").is_some())
            .into_iter()
            .filter_map(|n| Some((tree.attr(n, "data-rank")?.trim().parse().ok()?, n)))
            .collect();
        items.sort_by_key(|(rank, _)| *rank);

        Some(Self {
            block,
            hidden,
            style,
            items,
        })
    }

    /// Every rating block under `scope`.
    pub fn attach_all(tree: &RenderTree, scope: NodeId) -> Vec<Self> {
        tree.find_all(scope, |el| el.attr("data-rating").is_some())
            .into_iter()
            .filter_map(|b| Self::attach(tree, b))
            .collect()
    }

    pub fn max_rank(&self) -> u32 {
        self.items.last().map(|(r, _)| *r).unwrap_or(0)
    }

    /// Committed rank, if any.
    pub fn value(&self, tree: &RenderTree) -> Option<u32> {
        tree.value(self.hidden).trim().parse().ok()
    }

    fn lit(&self, item_rank: u32, chosen: u32) -> bool {
        match self.style {
            RatingStyle::Star => item_rank <= chosen,
            RatingStyle::Smiley => item_rank == chosen,
        }
    }

    /// Commit `rank` and restyle the items to show it.
    pub fn click(&self, tree: &mut RenderTree, rank: u32) {
        if !self.items.iter().any(|(r, _)| *r == rank) {
            return;
        }
        tree.set_value(self.hidden, &rank.to_string());
        tree.dispatch_event(self.hidden, "change");
        for &(item_rank, node) in &self.items {
            if self.lit(item_rank, rank) {
                tree.add_class(node, ACTIVE);
            } else {
                tree.remove_class(node, ACTIVE);
            }
            tree.remove_class(node, HOVER);
        }
    }

    /// Preview `rank` without committing it.
    pub fn hover(&self, tree: &mut RenderTree, rank: u32) {
        for &(item_rank, node) in &self.items {
            if self.lit(item_rank, rank) {
                tree.add_class(node, HOVER);
            } else {
                tree.remove_class(node, HOVER);
            }
        }
    }

    pub fn leave(&self, tree: &mut RenderTree) {
        for &(_, node) in &self.items {
            tree.remove_class(node, HOVER);
        }
    }
}
