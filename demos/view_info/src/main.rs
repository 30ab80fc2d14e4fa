use argh::FromArgs;
use gridview::image::{generic, BorrowedGridView, PixelFormat, SharedImage};
use gridview::imgproc::{core::std_mean, flip};
use gridview::linalg::mat;

#[derive(FromArgs)]
/// Allocate a padded grayscale image and inspect it through a borrowed view.
struct Args {
    /// width of the image in pixels
    #[argh(option, default = "640")]
    width: usize,

    /// height of the image in pixels
    #[argh(option, default = "480")]
    height: usize,

    /// extra bytes of padding at the end of every row
    #[argh(option, default = "0")]
    padding: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let image = SharedImage::with_bytes_per_line(
        args.width,
        args.height,
        args.width + args.padding,
        PixelFormat::Grayscale8,
    )?;
    let mut view = BorrowedGridView::<u8>::try_new(image.clone())?;

    // horizontal ramp, then mirrored
    for r in 0..view.nr() {
        for (c, px) in view.row_mut(r).iter_mut().enumerate() {
            *px = (c % 256) as u8;
        }
    }
    flip::horizontal_flip(&mut view);

    log::info!("image: {image:?}");
    println!("rows: {}", generic::num_rows(&view));
    println!("columns: {}", generic::num_columns(&view));
    println!("width step: {} bytes", generic::width_step(&view));
    println!("data: {:p}", generic::image_data(&view));
    println!("shared handles: {}", image.ref_count());

    match std_mean(&view) {
        Some((std, mean)) => println!("mean: {mean:.3}, std: {std:.3}"),
        None => println!("empty image"),
    }
    println!("sum through expression: {}", mat(&view).sum());

    Ok(())
}
