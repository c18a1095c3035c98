//! Example demonstrating the built-in generators and sampling utilities.

use sapling::*;

fn main() {
    println!("Sampling built-in generators");
    println!();

    let ints = Gen::<i32>::integral(Range::linear_from(0, -100, 100));
    println!("integers (linear range, size 50): {:?}", ints.sample(Size::new(50), 10));

    let words = Gen::lower().string(Range::constant(1, 8));
    println!("words: {:?}", words.sample(Size::new(10), 10));

    let pairs = Gen::<i32>::integral(Range::constant(0, 9))
        .bind(|a| Gen::<i32>::integral(Range::constant(0, 9)).map(move |b| (a, b)));
    println!("pairs: {:?}", pairs.sample(Size::new(10), 10));

    let maybe = Gen::<u8>::integral(Range::constant(0, 255)).option();
    println!("options (size 1): {:?}", maybe.sample(Size::new(1), 10));
    println!("options (size 50): {:?}", maybe.sample(Size::new(50), 10));

    let guids = Gen::guid();
    println!("guids: {:?}", guids.sample(Size::new(10), 3));

    println!();
    println!("A full dump, outcome plus immediate shrinks:");
    let mut stdout = std::io::stdout();
    Gen::<i32>::integral(Range::constant(0, 100))
        .print_sample(&mut stdout)
        .expect("writing to stdout");
}
