//! Example demonstrating shrink trees and counterexample minimization.

use sapling::*;

/// Descend to the first child that still fails, as a test-runner would.
fn minimize<T, F>(tree: &Tree<T>, failing: &F) -> T
where
    T: Clone + 'static,
    F: Fn(&T) -> bool,
{
    let mut current = tree.clone();
    loop {
        match current.children().find(|child| failing(child.value())) {
            Some(child) => current = child,
            None => return current.value().clone(),
        }
    }
}

fn main() {
    let seed = Seed::random();
    println!("Using {seed}");
    println!();

    let gen = Gen::<i32>::integral(Range::constant(0, 1000));
    let tree = gen.generate(Size::new(50), seed);
    println!("Drawn value: {}", tree.value());
    println!("Shrink tree (two levels):");
    println!("{}", tree.render_depth(2));

    // Pretend the property "x < 10" failed and minimize the counterexample.
    let failing = |x: &i32| *x >= 10;
    if failing(tree.value()) {
        println!("Minimal counterexample for x < 10: {}", minimize(&tree, &failing));
    } else {
        println!("Drawn value already satisfies x < 10");
    }

    println!();
    println!("Recursive structures stay bounded:");
    let expr = expression();
    println!("expressions: {:?}", expr.sample(Size::new(30), 5));
}

/// A tiny recursive generator: sums bottom out in literals as size shrinks.
fn expression() -> Gen<String> {
    let literal = Gen::<i32>::integral(Range::constant(0, 9)).map(|n| n.to_string());
    let sum = Gen::delay(expression).bind(|left| {
        Gen::delay(expression).map(move |right| format!("({left} + {right})"))
    });
    Gen::choice_rec(vec![literal], vec![sum])
}
