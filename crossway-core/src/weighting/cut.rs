//! Cutting a way's node sequence down to the run one traversal step covers

use crate::{NodeId, model::Crossing, model::Way, model::vehicle::is_truthy};

/// Legal travel direction along a way's node order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Both,
    Forward,
    Backward,
}

impl Direction {
    pub fn of(way: &Way) -> Self {
        if matches!(way.tag("junction"), Some("roundabout" | "circular")) {
            return Direction::Forward;
        }

        match way.tag("oneway") {
            None | Some("no" | "false" | "0") => Direction::Both,
            Some(v) if is_truthy(v) => Direction::Forward,
            Some("-1" | "reverse") => Direction::Backward,
            // reversible, alternating and friends carry no fixed direction
            Some(_) => Direction::Both,
        }
    }
}

/// First occurrence of `id` in the sequence
pub fn position_of(id: NodeId, nodes: &[Crossing]) -> Option<usize> {
    nodes.iter().position(|c| c.id == id)
}

/// Drops the part of the sequence that cannot be reached from `from`
/// without breaking the way's direction rules.
pub fn cut_oneway<'a>(from: NodeId, way: &Way, nodes: &'a [Crossing]) -> Option<&'a [Crossing]> {
    let idx = position_of(from, nodes)?;

    Some(match Direction::of(way) {
        Direction::Both => nodes,
        Direction::Forward => &nodes[idx..],
        Direction::Backward => &nodes[..=idx],
    })
}

/// Keeps the run between the boundaries bracketing `from`: the nearest
/// crossing before it (or the sequence start) and the nearest crossing after
/// it (or the sequence end).
pub fn cut_crossing(from: NodeId, nodes: &[Crossing]) -> Option<&[Crossing]> {
    let idx = position_of(from, nodes)?;

    let lower = nodes[..idx].iter().rposition(|c| c.is_crossing).unwrap_or(0);
    let upper = nodes[idx + 1..]
        .iter()
        .position(|c| c.is_crossing)
        .map_or(nodes.len() - 1, |offset| idx + 1 + offset);

    if lower == upper {
        return None;
    }

    Some(&nodes[lower..=upper])
}

/// Direction cut followed by crossing cut
pub fn cut_path_nodes<'a>(
    from: NodeId,
    way: &Way,
    nodes: &'a [Crossing],
) -> Option<&'a [Crossing]> {
    let directed = cut_oneway(from, way, nodes)?;
    cut_crossing(from, directed)
}

#[cfg(test)]
mod tests {
    use geo::Point;

    use super::*;

    fn sequence(n: usize, crossings: &[usize]) -> Vec<Crossing> {
        (0..n)
            .map(|i| Crossing {
                id: i as NodeId,
                position: i,
                point: Point::new(i as f64 * 0.001, 0.0),
                is_crossing: crossings.contains(&i),
            })
            .collect()
    }

    fn ids(nodes: &[Crossing]) -> Vec<NodeId> {
        nodes.iter().map(|c| c.id).collect()
    }

    fn way(tags: &[(&str, &str)]) -> Way {
        tags.iter()
            .fold(Way::new(1, (0..10).collect()), |w, (k, v)| w.with_tag(k, v))
    }

    #[test]
    fn oneway_variants() {
        let nodes = sequence(10, &[]);

        let yes = cut_oneway(4, &way(&[("oneway", "yes")]), &nodes).unwrap();
        assert_eq!(ids(yes), (4..10).collect::<Vec<_>>());

        let reverse = cut_oneway(4, &way(&[("oneway", "-1")]), &nodes).unwrap();
        assert_eq!(ids(reverse), (0..=4).collect::<Vec<_>>());

        let untagged = cut_oneway(4, &way(&[]), &nodes).unwrap();
        assert_eq!(untagged.len(), 10);

        let no = cut_oneway(4, &way(&[("oneway", "no")]), &nodes).unwrap();
        assert_eq!(no.len(), 10);
    }

    #[test]
    fn roundabout_ignores_oneway_tag() {
        let nodes = sequence(10, &[]);
        let roundabout = way(&[("junction", "roundabout"), ("oneway", "-1")]);
        let cut = cut_oneway(4, &roundabout, &nodes).unwrap();
        assert_eq!(ids(cut), (4..10).collect::<Vec<_>>());
    }

    #[test]
    fn oneway_fails_for_foreign_node() {
        let nodes = sequence(10, &[]);
        assert!(cut_oneway(42, &way(&[]), &nodes).is_none());
    }

    #[test]
    fn crossing_cut_brackets_from() {
        let nodes = sequence(10, &[0, 3, 7]);
        let cut = cut_crossing(5, &nodes).unwrap();
        assert_eq!(ids(cut), vec![3, 4, 5, 6, 7]);
    }

    #[test]
    fn crossing_cut_from_a_crossing_reaches_both_neighbors() {
        let nodes = sequence(10, &[0, 3, 7]);
        let cut = cut_crossing(3, &nodes).unwrap();
        assert_eq!(ids(cut), vec![0, 1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn sequence_ends_bound_the_segment() {
        let nodes = sequence(5, &[]);
        let cut = cut_crossing(2, &nodes).unwrap();
        assert_eq!(ids(cut), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn lone_node_has_no_segment() {
        let nodes = sequence(10, &[]);
        let yes = way(&[("oneway", "yes")]);
        assert!(cut_path_nodes(9, &yes, &nodes).is_none());
        assert!(cut_path_nodes(8, &yes, &nodes).is_some());
    }

    #[test]
    fn loop_keeps_intermediate_nodes() {
        // 0 1 2 3 0 with the closing node shared with another way
        let mut nodes = sequence(4, &[0]);
        nodes.push(Crossing {
            position: 4,
            ..nodes[0]
        });
        let loop_way = Way::new(1, vec![0, 1, 2, 3, 0]);

        let cut = cut_path_nodes(0, &loop_way, &nodes).unwrap();
        assert_eq!(ids(cut), vec![0, 1, 2, 3, 0]);

        let cut = cut_path_nodes(2, &loop_way, &nodes).unwrap();
        assert_eq!(ids(cut), vec![0, 1, 2, 3, 0]);
    }
}
