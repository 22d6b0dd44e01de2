//! Rendering checks, run on the simulated display

use crate::dom::{name_pattern, Role};
use crate::expect::{expect, Check};
use crate::scenario::{Context, Scenario};
use crate::subject::{render_greeting, Hello, GREETING_PREFIX, HELLO};

pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario::new("client smoke", "renders a simple component", file!(), renders_hello),
        Scenario::new("client smoke", "greets by name", file!(), greets_by_name),
    ]
}

fn renders_hello(ctx: &mut Context) -> Check {
    ctx.render(&Hello::new("Mundo"))?;

    let name = name_pattern("(?i)olá, mundo")?;
    let button = ctx.screen()?.query_by_role(Role::Button, &name);
    expect(button).to_be_in_document()?;
    ctx.screen()?.get_by_role(Role::Button, &name)?;
    Ok(())
}

fn greets_by_name(ctx: &mut Context) -> Check {
    for name in ["Mundo", "", "Ana Luísa"] {
        let text = ctx.call(&HELLO, || render_greeting(name));
        expect(&text).to_start_with(GREETING_PREFIX)?;
        expect(&text).to_contain(name)?;
    }
    Ok(())
}
