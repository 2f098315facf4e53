mod assemble;
mod helpers;
mod recolor;
