//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

pub mod blocks;
pub mod font;
pub mod render;

use std::error::Error;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::blocks::list_blocks;
use crate::cli::font::adjust_font;
use crate::cli::render::{render_to_terminal, RenderOptions};
use crate::core::config::Settings;
use crate::core::message::Role;
use crate::ui::markdown::render_message_with;
use crate::ui::span::CodeBlockId;
use crate::ui::theme::Palette;
use crate::utils::logging::init_tracing;

#[derive(Parser)]
#[command(name = "chatmark")]
#[command(about = "Render chat messages written in a small markdown dialect")]
#[command(
    long_about = "Chatmark renders a chat message through the markdown pipeline: block \
tokenizing, inline formatting, document assembly and theme coloring. Code blocks are \
drawn as separate widgets positioned over the text, and their raw text can be copied \
by id.\n\n\
Message files are read as UTF-8; pass '-' to read standard input.\n\n\
Environment Variables:\n\
  CHATMARK_LOG      Tracing filter directive (defaults to 'warn')"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Settings file to use instead of the platform default
    #[arg(short = 'c', long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write diagnostics to the specified file
    #[arg(short = 'l', long, global = true, value_name = "FILE")]
    pub log: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a message to the terminal with code block widgets in place
    Render {
        /// Message file, or '-' for standard input
        file: PathBuf,
        /// Whose message this is; affects text colors only
        #[arg(short, long, value_parser = parse_role, default_value = "assistant")]
        role: Role,
        /// Override the theme from the settings file
        #[arg(short, long, value_enum)]
        theme: Option<ThemeArg>,
        /// Surface width in cells
        #[arg(short, long, default_value_t = 80)]
        width: u16,
        /// Viewport height in rows (defaults to the full document)
        #[arg(long)]
        height: Option<u16>,
        /// Rows scrolled off the top of the viewport
        #[arg(short, long, default_value_t = 0)]
        scroll: usize,
    },
    /// List the blocks a message tokenizes into
    Blocks {
        /// Message file, or '-' for standard input
        file: PathBuf,
    },
    /// Print the raw text of one code block
    Copy {
        /// Message file, or '-' for standard input
        file: PathBuf,
        /// Code block id as shown by `render` or `blocks`
        id: usize,
    },
    /// Change the font size adjustment stored in the settings file
    Font {
        #[arg(value_enum)]
        action: FontAction,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FontAction {
    Bigger,
    Smaller,
    Reset,
}

fn parse_role(value: &str) -> Result<Role, String> {
    Role::try_from(value)
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_tracing(args.log.as_deref())?;
    run(args)
}

pub fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let settings_path = match args.config {
        Some(path) => path,
        None => Settings::default_path()?,
    };
    let settings = Settings::load_from_path(&settings_path)?;

    match args.command {
        Commands::Render {
            file,
            role,
            theme,
            width,
            height,
            scroll,
        } => {
            let text = read_message(&file)?;
            let mut config = settings.render_config()?;
            if let Some(theme) = theme {
                config = config.with_dark_theme(theme == ThemeArg::Dark);
            }
            let palette = Palette::semantic().with_overrides(&settings.palette);
            let rendered = render_message_with(&text, role, &config, &palette);
            let options = RenderOptions {
                width,
                height,
                scroll,
            };
            print!("{}", render_to_terminal(&rendered, &options));
            Ok(())
        }
        Commands::Blocks { file } => {
            let text = read_message(&file)?;
            print!("{}", list_blocks(&text));
            Ok(())
        }
        Commands::Copy { file, id } => {
            let text = read_message(&file)?;
            let config = settings.render_config()?;
            let rendered = render_message_with(&text, Role::Assistant, &config, &Palette::default());
            match rendered.registry.copy_text(CodeBlockId::new(id)) {
                Some(raw) => {
                    println!("{raw}");
                    Ok(())
                }
                None => {
                    eprintln!(
                        "❌ No code block with id {id} ({} in message)",
                        rendered.registry.len()
                    );
                    std::process::exit(1);
                }
            }
        }
        Commands::Font { action } => {
            let adjustment = adjust_font(&settings_path, settings, action)?;
            println!("✅ Font size adjustment set to {adjustment:+}");
            Ok(())
        }
    }
}

fn read_message(path: &Path) -> Result<String, Box<dyn Error>> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }
    std::fs::read_to_string(path)
        .map_err(|err| format!("Failed to read message at {}: {err}", path.display()).into())
}
