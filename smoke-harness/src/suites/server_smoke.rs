//! Harness self-checks that need no display

use crate::expect::{expect, Check};
use crate::scenario::{Context, Scenario};
use crate::subject::{add, ADD};

pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario::new("smoke", "runs a basic truthy assertion", file!(), truthy),
        Scenario::new("smoke", "adds two numbers", file!(), sum),
        Scenario::new("smoke", "adds in either order", file!(), sum_commutes),
    ]
}

fn truthy(_ctx: &mut Context) -> Check {
    expect(true).to_be_true()
}

fn sum(ctx: &mut Context) -> Check {
    let sum = ctx.call(&ADD, || add(2, 3));
    expect(sum).to_be(5)
}

fn sum_commutes(ctx: &mut Context) -> Check {
    for (a, b) in [(2, 3), (-4, 9), (i64::MAX, 1)] {
        let left = ctx.call(&ADD, || add(a, b));
        let right = ctx.call(&ADD, || add(b, a));
        expect(left).to_be(right)?;
    }
    Ok(())
}
