use crate::error::Result;

use super::context::AppContext;
use super::display;

pub fn run(ctx: &AppContext) -> Result<()> {
    println!("{}", display::render_options(ctx.service.stages().table()));
    Ok(())
}
