use geo::{BooleanOps, MultiPolygon};

/// Set union of many boundaries. Adjacent polygons fuse along shared edges; disjoint
/// ones stay separate members of the result.
pub trait PolygonUnion {
    fn union_all(&self, shapes: &[&MultiPolygon<f64>]) -> MultiPolygon<f64>;
}

/// Pairwise union in rounds (a balanced tree), which keeps intermediate polygons small
/// compared to folding everything into one accumulator.
#[derive(Debug, Clone, Copy, Default)]
pub struct CascadedUnion;

impl PolygonUnion for CascadedUnion {
    fn union_all(&self, shapes: &[&MultiPolygon<f64>]) -> MultiPolygon<f64> {
        let mut layer = shapes.iter().map(|&shape| shape.clone()).collect::<Vec<_>>();
        while layer.len() > 1 {
            layer = layer.chunks(2)
                .map(|pair| pair[1..].iter().fold(pair[0].clone(), |acc, shape| acc.union(shape)))
                .collect();
        }
        layer.pop().unwrap_or_else(|| MultiPolygon(Vec::new()))
    }
}
