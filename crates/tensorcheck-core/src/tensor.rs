use smallvec::SmallVec;

/// Dimension sizes, outermost first.
///
/// Dims are kept signed because that is what travels on the wire; the server
/// owns rejecting non-positive sizes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Shape(pub SmallVec<[i64; 6]>);

impl Shape {
    pub fn rank(&self) -> usize {
        self.0.len()
    }
    pub fn dims(&self) -> &[i64] {
        &self.0
    }
}

impl From<Vec<i64>> for Shape {
    fn from(dims: Vec<i64>) -> Self {
        Self(SmallVec::from_vec(dims))
    }
}

/// Dense tensor as exchanged with the service: a shape plus row-major values.
///
/// No relation between `shape` and `values` is enforced here. Whatever was
/// parsed is transported as is.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tensor {
    pub shape: Shape,
    pub values: Vec<f64>,
}

impl Tensor {
    pub fn new(shape: Vec<i64>, values: Vec<f64>) -> Self {
        Self {
            shape: Shape::from(shape),
            values,
        }
    }
}
