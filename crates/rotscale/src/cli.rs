use std::path::PathBuf;

use argh::FromArgs;

use rotscale_imgproc::{warp, ExecutionStrategy, Point2d, TransformSpec};
use rotscale_io::{functional as F, reference};

/// Errors reported for arguments before the engine runs.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum CliError {
    /// The rotation angle is not a finite number.
    #[error("the rotation angle must be a finite number, got {0}")]
    InvalidAngle(f64),

    /// A center ratio lies outside `[0, 1]`.
    #[error("the rotation center must lie between 0 and 1, got ({0}, {1})")]
    InvalidCenter(f64, f64),

    /// A scale factor is not finite and positive.
    #[error("the scale factors must be finite and positive, got ({0}, {1})")]
    InvalidScale(f64, f64),

    /// Zero worker threads were requested.
    #[error("the number of threads must be greater than zero")]
    InvalidThreads,
}

#[derive(FromArgs, Debug, PartialEq)]
/// Rotate or scale an image with bilinear resampling.
pub struct Args {
    /// print debug logs
    #[argh(switch, short = 'v')]
    pub verbose: bool,

    #[argh(subcommand)]
    /// the operation to run
    pub command: Command,
}

#[derive(FromArgs, Debug, PartialEq)]
#[argh(subcommand)]
/// The supported operations.
pub enum Command {
    /// rotate about a point
    Rotate(RotateArgs),
    /// scale along x and y
    Scale(ScaleArgs),
}

#[derive(FromArgs, Debug, PartialEq)]
/// Rotate an image about a point given as fractions of its width and height.
#[argh(subcommand, name = "rotate")]
pub struct RotateArgs {
    /// path to an input image
    #[argh(option, short = 'i')]
    pub input: PathBuf,

    /// path to the output image
    #[argh(option, short = 'o')]
    pub output: PathBuf,

    /// rotation angle in degrees, positive is counter-clockwise
    #[argh(option, short = 'a')]
    pub angle: f64,

    /// horizontal position of the center in [0, 1] (default 0.5)
    #[argh(option, default = "0.5")]
    pub center_x: f64,

    /// vertical position of the center in [0, 1] (default 0.5)
    #[argh(option, default = "0.5")]
    pub center_y: f64,

    /// also write the reference rotation next to the output
    #[argh(switch)]
    pub verify: bool,

    /// number of worker threads (default: the global pool)
    #[argh(option)]
    pub threads: Option<usize>,
}

#[derive(FromArgs, Debug, PartialEq)]
/// Scale an image by independent horizontal and vertical factors.
#[argh(subcommand, name = "scale")]
pub struct ScaleArgs {
    /// path to an input image
    #[argh(option, short = 'i')]
    pub input: PathBuf,

    /// path to the output image
    #[argh(option, short = 'o')]
    pub output: PathBuf,

    /// horizontal scale factor, e.g. 2.0 doubles the width
    #[argh(option)]
    pub scale_x: f64,

    /// vertical scale factor
    #[argh(option)]
    pub scale_y: f64,

    /// also write the reference scaling next to the output
    #[argh(switch)]
    pub verify: bool,

    /// number of worker threads (default: the global pool)
    #[argh(option)]
    pub threads: Option<usize>,
}

impl RotateArgs {
    /// Rejects a non-finite angle or a center outside the image.
    pub fn validate(&self) -> Result<(), CliError> {
        if !self.angle.is_finite() {
            return Err(CliError::InvalidAngle(self.angle));
        }
        let in_unit = |r: f64| (0.0..=1.0).contains(&r);
        if !(in_unit(self.center_x) && in_unit(self.center_y)) {
            return Err(CliError::InvalidCenter(self.center_x, self.center_y));
        }
        Ok(())
    }
}

impl ScaleArgs {
    /// Rejects scale factors that are zero, negative or not finite.
    pub fn validate(&self) -> Result<(), CliError> {
        let valid = |s: f64| s.is_finite() && s > 0.0;
        if !(valid(self.scale_x) && valid(self.scale_y)) {
            return Err(CliError::InvalidScale(self.scale_x, self.scale_y));
        }
        Ok(())
    }
}

/// Maps the `--threads` option to an execution strategy.
pub fn execution_strategy(threads: Option<usize>) -> Result<ExecutionStrategy, CliError> {
    match threads {
        None => Ok(ExecutionStrategy::ParallelRows),
        Some(0) => Err(CliError::InvalidThreads),
        Some(1) => Ok(ExecutionStrategy::Serial),
        Some(n) => Ok(ExecutionStrategy::Fixed(n)),
    }
}

/// Runs the parsed command.
pub fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    match &args.command {
        Command::Rotate(args) => rotate(args),
        Command::Scale(args) => scale(args),
    }
}

fn rotate(args: &RotateArgs) -> Result<(), Box<dyn std::error::Error>> {
    args.validate()?;
    let strategy = execution_strategy(args.threads)?;

    let src = F::read_image_any_rgb8(&args.input)?;
    let center = Point2d::new(
        src.width() as f64 * args.center_x,
        src.height() as f64 * args.center_y,
    );
    let plan = TransformSpec::Rotate {
        center,
        angle_deg: args.angle,
    }
    .plan(src.size())?;

    log::info!("rotating by {} degrees", args.angle);
    let dst = warp::warp_with_plan(&src, &plan, strategy)?;
    F::write_image_any_rgb8(&args.output, &dst)?;

    if args.verify {
        let origin = plan.bbox.origin;
        let verify = reference::rotate_reference(
            &src,
            (center.x, center.y),
            args.angle,
            plan.bbox.size,
            (origin.x, origin.y),
        )?;
        F::write_image_any_rgb8(F::verify_output_path(&args.output), &verify)?;
    }

    Ok(())
}

fn scale(args: &ScaleArgs) -> Result<(), Box<dyn std::error::Error>> {
    args.validate()?;
    let strategy = execution_strategy(args.threads)?;

    let src = F::read_image_any_rgb8(&args.input)?;
    let plan = TransformSpec::Scale {
        scale_x: args.scale_x,
        scale_y: args.scale_y,
    }
    .plan(src.size())?;

    log::info!("scaling by ({}, {})", args.scale_x, args.scale_y);
    let dst = warp::warp_with_plan(&src, &plan, strategy)?;
    F::write_image_any_rgb8(&args.output, &dst)?;

    if args.verify {
        let verify =
            reference::scale_reference(&src, args.scale_x, args.scale_y, plan.bbox.size)?;
        F::write_image_any_rgb8(F::verify_output_path(&args.output), &verify)?;
    }

    Ok(())
}
