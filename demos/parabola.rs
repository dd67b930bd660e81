extern crate parabolic_spline_editor;

use parabolic_spline_editor::{ControlPoint, QuadraticSpline, SEED_POINTS};

fn main() {

    let points: Vec<ControlPoint> = SEED_POINTS
        .iter()
        .map(|p| ControlPoint::from(*p))
        .collect();

    let spline = QuadraticSpline::new(&points).unwrap();

    let number_of_steps = 40;

    println!("x;y");
    for sample in spline.sample(number_of_steps + 1) {
        println!("{:.2};{:.2}", sample.x, sample.y);
    }
}
