use gridview_image::GenericImage;

/// A lazily evaluated matrix.
pub trait MatrixExp {
    /// The element type of the matrix.
    type Elem: Copy;

    /// Number of rows.
    fn nr(&self) -> usize;

    /// Number of columns.
    fn nc(&self) -> usize;

    /// The element at `r`, `c`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    fn at(&self, r: usize, c: usize) -> Self::Elem;

    /// Number of elements.
    fn size(&self) -> usize {
        self.nr() * self.nc()
    }
}

/// Expression leaf reading the pixels of a generic image.
#[derive(Debug)]
pub struct Array2dToMat<'a, I: GenericImage> {
    img: &'a I,
}

impl<'a, I: GenericImage> Array2dToMat<'a, I> {
    /// Wrap `img` without copying it.
    pub fn new(img: &'a I) -> Self {
        Self { img }
    }
}

impl<I: GenericImage> Clone for Array2dToMat<'_, I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I: GenericImage> Copy for Array2dToMat<'_, I> {}

impl<I: GenericImage> MatrixExp for Array2dToMat<'_, I> {
    type Elem = I::Pixel;

    #[inline]
    fn nr(&self) -> usize {
        self.img.num_rows()
    }

    #[inline]
    fn nc(&self) -> usize {
        self.img.num_columns()
    }

    #[inline]
    #[track_caller]
    fn at(&self, r: usize, c: usize) -> I::Pixel {
        self.img.row_slice(r)[c]
    }
}

/// Expression swapping the rows and columns of its operand.
#[derive(Clone, Copy, Debug)]
pub struct Transpose<Op> {
    op: Op,
}

impl<Op: MatrixExp> MatrixExp for Transpose<Op> {
    type Elem = Op::Elem;

    #[inline]
    fn nr(&self) -> usize {
        self.op.nc()
    }

    #[inline]
    fn nc(&self) -> usize {
        self.op.nr()
    }

    #[inline]
    #[track_caller]
    fn at(&self, r: usize, c: usize) -> Op::Elem {
        self.op.at(c, r)
    }
}

/// A node of a matrix expression tree.
///
/// The node only wraps its operation; evaluation happens element by element
/// when the expression is read.
#[derive(Clone, Copy, Debug)]
pub struct MatrixOp<Op> {
    op: Op,
}

impl<Op: MatrixExp> MatrixOp<Op> {
    /// Wrap an operation into an expression node.
    pub fn new(op: Op) -> Self {
        Self { op }
    }

    /// The wrapped operation.
    pub fn op(&self) -> &Op {
        &self.op
    }

    /// Lazy transpose of the expression.
    pub fn transpose(self) -> MatrixOp<Transpose<Op>> {
        MatrixOp::new(Transpose { op: self.op })
    }

    /// Sum of all the elements.
    pub fn sum(&self) -> f64
    where
        Op::Elem: Into<f64>,
    {
        let mut acc = 0f64;
        for r in 0..self.nr() {
            for c in 0..self.nc() {
                let v: f64 = self.at(r, c).into();
                acc += v;
            }
        }
        acc
    }

    /// Evaluate the expression into a dense matrix.
    pub fn to_faer(&self) -> faer::Mat<f64>
    where
        Op::Elem: Into<f64>,
    {
        faer::Mat::from_fn(self.nr(), self.nc(), |r, c| self.at(r, c).into())
    }
}

impl<Op: MatrixExp> MatrixExp for MatrixOp<Op> {
    type Elem = Op::Elem;

    #[inline]
    fn nr(&self) -> usize {
        self.op.nr()
    }

    #[inline]
    fn nc(&self) -> usize {
        self.op.nc()
    }

    #[inline]
    #[track_caller]
    fn at(&self, r: usize, c: usize) -> Op::Elem {
        self.op.at(r, c)
    }
}

/// Wrap a generic image into a matrix expression.
///
/// The expression borrows `img`; no pixel is copied.
pub fn mat<I: GenericImage>(img: &I) -> MatrixOp<Array2dToMat<'_, I>> {
    MatrixOp::new(Array2dToMat::new(img))
}
