use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

use gridview_storage::{ExternalImage, SharedImage};

use crate::{error::ImageError, generic::GenericImage, pixel::Pixel};

/// A two dimensional pixel grid over memory owned by an external image.
///
/// The view stores a shallow copy of the image handle `H` and, every time it
/// is bound to a handle, caches the pixel pointer, the row stride in bytes and
/// the dimensions reported by that handle. Accessors only read the cache.
///
/// Rows are addressed as `data + width_step * row`, so padded rows are
/// supported. `view[row][col]` first resolves the row, then indexes into it.
///
/// # Aliasing
///
/// Views never copy pixels. Every clone of a view, and every clone of the
/// handle it was built from, refers to the same memory: a write through one
/// alias is visible through all of them. The view performs no
/// synchronization. Writing through one alias while a row slice obtained from
/// another alias is alive is undefined behavior; the caller must keep such
/// borrows apart, exactly as with the external image.
///
/// # Examples
///
/// ```
/// use gridview_image::BorrowedGridView;
/// use gridview_storage::{PixelFormat, SharedImage};
///
/// let image = SharedImage::with_bytes_per_line(4, 3, 16, PixelFormat::Argb32).unwrap();
/// let view = BorrowedGridView::<u32>::new(image);
///
/// assert_eq!(view.nr(), 3);
/// assert_eq!(view.nc(), 4);
/// assert_eq!(view.width_step(), 16);
///
/// let offset = view.row_ptr(2) as usize + 3 * 4 - view.row_ptr(0) as usize;
/// assert_eq!(offset, 44);
/// ```
pub struct BorrowedGridView<P: Pixel, H: ExternalImage = SharedImage> {
    handle: H,
    data: *mut u8,
    width_step: usize,
    nr: usize,
    nc: usize,
    _pixel: PhantomData<P>,
}

impl<P: Pixel, H: ExternalImage> BorrowedGridView<P, H> {
    /// Create a view over the pixels of `handle`.
    ///
    /// In debug builds, the storage format of a non-empty image must be one of
    /// `P::FORMATS`. Use [`BorrowedGridView::try_new`] to check the format in
    /// every build.
    ///
    /// # Panics
    ///
    /// Panics if a row of `P` pixels doesn't fit in the row stride of the
    /// image, or if the image memory is not aligned for `P`.
    #[track_caller]
    pub fn new(handle: H) -> Self {
        let mut view = Self {
            handle,
            data: std::ptr::null_mut(),
            width_step: 0,
            nr: 0,
            nc: 0,
            _pixel: PhantomData,
        };
        view.init();
        view
    }

    /// Create a view over the pixels of the image behind `handle`.
    #[track_caller]
    pub fn from_ref(handle: &H) -> Self {
        Self::new(handle.clone())
    }

    /// Create a view after checking that `P` matches the image format.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage format of a non-empty image is not one
    /// of `P::FORMATS`, or if the geometry cannot hold `P` pixels.
    pub fn try_new(handle: H) -> Result<Self, ImageError> {
        if handle.width() != 0 && handle.height() != 0 {
            check_format::<P>(&handle)?;
            check_layout::<P>(
                handle.bits(),
                handle.width(),
                handle.bytes_per_line(),
            )?;
        }
        Ok(Self::new(handle))
    }

    /// Rebind the view to `handle`, replacing the previous one.
    #[track_caller]
    pub fn assign(&mut self, handle: H) {
        self.handle = handle;
        self.init();
    }

    /// Rebind the view to a shallow copy of the image behind `handle`.
    #[track_caller]
    pub fn assign_from(&mut self, handle: &H) {
        self.assign(handle.clone());
    }

    /// Read the geometry of the current handle into the cache.
    #[track_caller]
    fn init(&mut self) {
        self.data = self.handle.bits();
        self.width_step = self.handle.bytes_per_line();
        self.nr = self.handle.height();
        self.nc = self.handle.width();

        if self.size() != 0 {
            debug_assert!(
                P::matches_format(self.handle.format()),
                "The pixel type {} doesn't match the {} format of the image",
                std::any::type_name::<P>(),
                self.handle.format(),
            );
            if let Err(err) = check_layout::<P>(self.data, self.nc, self.width_step) {
                panic!("cannot view the image as {}: {err}", std::any::type_name::<P>());
            }
        }

        log::trace!(
            "bound {}x{} view at {:p} with {} bytes per row",
            self.nc,
            self.nr,
            self.data,
            self.width_step,
        );
    }

    /// The handle the view borrows its pixels from.
    pub fn handle(&self) -> &H {
        &self.handle
    }

    /// Consume the view and return its handle.
    pub fn into_handle(self) -> H {
        self.handle
    }

    /// Number of rows.
    #[inline]
    pub fn nr(&self) -> usize {
        self.nr
    }

    /// Number of columns.
    #[inline]
    pub fn nc(&self) -> usize {
        self.nc
    }

    /// Byte distance between the starts of two consecutive rows.
    #[inline]
    pub fn width_step(&self) -> usize {
        self.width_step
    }

    /// Number of pixels, `nr() * nc()`.
    #[inline]
    pub fn size(&self) -> usize {
        self.nr * self.nc
    }

    /// Returns true if the view has no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    #[inline]
    #[track_caller]
    fn check_row(&self, row: usize, accessor: &str) {
        assert!(
            row < self.nr,
            "\t{accessor}\n\t you have asked for an out of bounds row\n\t row:  {row}\n\t nr(): {}\n\t this: {:p}",
            self.nr,
            self,
        );
    }

    #[inline]
    #[track_caller]
    fn check_col(&self, col: usize, accessor: &str) {
        assert!(
            col < self.nc,
            "\t{accessor}\n\t you have asked for an out of bounds column\n\t col:  {col}\n\t nc(): {}\n\t this: {:p}",
            self.nc,
            self,
        );
    }

    /// Pointer to the first pixel of `row`.
    ///
    /// The bounds of `row` are asserted in debug builds and with the
    /// `strict-bounds` feature. The pointer is computed with wrapping
    /// arithmetic; dereferencing it is only valid for rows in bounds.
    #[inline]
    #[track_caller]
    pub fn row_ptr(&self, row: usize) -> *const P {
        if cfg!(any(debug_assertions, feature = "strict-bounds")) {
            self.check_row(row, "BorrowedGridView::row_ptr");
        }
        self.data.wrapping_add(self.width_step.wrapping_mul(row)) as *const P
    }

    /// Mutable pointer to the first pixel of `row`.
    ///
    /// See [`BorrowedGridView::row_ptr`].
    #[inline]
    #[track_caller]
    pub fn row_ptr_mut(&mut self, row: usize) -> *mut P {
        if cfg!(any(debug_assertions, feature = "strict-bounds")) {
            self.check_row(row, "BorrowedGridView::row_ptr_mut");
        }
        self.data.wrapping_add(self.width_step.wrapping_mul(row)) as *mut P
    }

    /// The pixels of `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= nr()`.
    #[inline]
    #[track_caller]
    pub fn row(&self, row: usize) -> &[P] {
        self.check_row(row, "BorrowedGridView::row");
        if self.nc == 0 {
            return &[];
        }
        let ptr = self.data.wrapping_add(self.width_step * row) as *const P;
        // SAFETY: the row exists and `init` checked that `nc` aligned pixels
        // fit in every row
        unsafe { std::slice::from_raw_parts(ptr, self.nc) }
    }

    /// The pixels of `row`, mutably.
    ///
    /// # Panics
    ///
    /// Panics if `row >= nr()`.
    #[inline]
    #[track_caller]
    pub fn row_mut(&mut self, row: usize) -> &mut [P] {
        self.check_row(row, "BorrowedGridView::row_mut");
        if self.nc == 0 {
            return &mut [];
        }
        let ptr = self.data.wrapping_add(self.width_step * row) as *mut P;
        // SAFETY: see `row`
        unsafe { std::slice::from_raw_parts_mut(ptr, self.nc) }
    }

    /// Read the pixel at `row`, `col`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    #[track_caller]
    pub fn get(&self, row: usize, col: usize) -> P {
        self.check_row(row, "BorrowedGridView::get");
        self.check_col(col, "BorrowedGridView::get");
        let ptr = self.data.wrapping_add(self.width_step * row) as *const P;
        // SAFETY: both coordinates are in bounds
        unsafe { ptr.add(col).read() }
    }

    /// Write the pixel at `row`, `col`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    #[track_caller]
    pub fn set(&mut self, row: usize, col: usize, value: P) {
        self.check_row(row, "BorrowedGridView::set");
        self.check_col(col, "BorrowedGridView::set");
        let ptr = self.data.wrapping_add(self.width_step * row) as *mut P;
        // SAFETY: both coordinates are in bounds
        unsafe { ptr.add(col).write(value) }
    }

    /// Iterate over the rows of the view.
    pub fn rows(&self) -> impl Iterator<Item = &[P]> + '_ {
        (0..self.nr).map(move |row| self.row(row))
    }
}

fn check_format<P: Pixel>(handle: &impl ExternalImage) -> Result<(), ImageError> {
    if P::matches_format(handle.format()) {
        return Ok(());
    }
    log::debug!(
        "rejecting view of {} image as {}",
        handle.format(),
        std::any::type_name::<P>()
    );
    Err(ImageError::PixelFormatMismatch {
        format: handle.format(),
        pixel: std::any::type_name::<P>(),
    })
}

fn check_layout<P: Pixel>(data: *mut u8, nc: usize, width_step: usize) -> Result<(), ImageError> {
    let pixel_size = std::mem::size_of::<P>();
    if nc.checked_mul(pixel_size).map_or(true, |row| row > width_step) {
        return Err(ImageError::RowOverflow {
            columns: nc,
            pixel_size,
            width_step,
        });
    }
    let align = std::mem::align_of::<P>();
    if data as usize % align != 0 || width_step % align != 0 {
        return Err(ImageError::MisalignedData(align));
    }
    Ok(())
}

impl<P: Pixel, H: ExternalImage + Default> Default for BorrowedGridView<P, H> {
    /// A view over a default handle, empty when the handle is null.
    #[track_caller]
    fn default() -> Self {
        Self::new(H::default())
    }
}

impl<P: Pixel, H: ExternalImage> Clone for BorrowedGridView<P, H> {
    /// A new view sharing the pixels of this one.
    fn clone(&self) -> Self {
        Self::new(self.handle.clone())
    }

    fn clone_from(&mut self, source: &Self) {
        self.assign_from(&source.handle);
    }
}

impl<P: Pixel, H: ExternalImage> From<H> for BorrowedGridView<P, H> {
    fn from(handle: H) -> Self {
        Self::new(handle)
    }
}

impl<P: Pixel, H: ExternalImage> Index<usize> for BorrowedGridView<P, H> {
    type Output = [P];

    #[track_caller]
    fn index(&self, row: usize) -> &[P] {
        self.row(row)
    }
}

impl<P: Pixel, H: ExternalImage> IndexMut<usize> for BorrowedGridView<P, H> {
    #[track_caller]
    fn index_mut(&mut self, row: usize) -> &mut [P] {
        self.row_mut(row)
    }
}

// SAFETY: `init` validated that `nc` aligned pixels fit in each of the `nr`
// rows of the external image, and the handle keeps the memory alive.
unsafe impl<P: Pixel, H: ExternalImage> GenericImage for BorrowedGridView<P, H> {
    type Pixel = P;

    #[inline]
    fn num_rows(&self) -> usize {
        self.nr
    }

    #[inline]
    fn num_columns(&self) -> usize {
        self.nc
    }

    #[inline]
    fn image_data(&self) -> *const u8 {
        if self.size() != 0 {
            self.data
        } else {
            std::ptr::null()
        }
    }

    #[inline]
    fn image_data_mut(&mut self) -> *mut u8 {
        if self.size() != 0 {
            self.data
        } else {
            std::ptr::null_mut()
        }
    }

    #[inline]
    fn width_step(&self) -> usize {
        self.width_step
    }
}

impl<P: Pixel, H: ExternalImage + std::fmt::Debug> std::fmt::Debug for BorrowedGridView<P, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BorrowedGridView")
            .field("pixel", &std::any::type_name::<P>())
            .field("data", &self.data)
            .field("nr", &self.nr)
            .field("nc", &self.nc)
            .field("width_step", &self.width_step)
            .field("handle", &self.handle)
            .finish()
    }
}
