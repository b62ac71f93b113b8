//! # Parallax LCD CLI
//!
//! Command-line interface for Parallax serial LCDs.
//!
//! ## Usage
//!
//! ```bash
//! # Clear the screen and print on the second line (9600 baud)
//! parallax-lcd clear
//! parallax-lcd print --line 1 "Hello"
//!
//! # 19200 baud on a USB adapter
//! parallax-lcd --mode 2 --device /dev/ttyUSB0 backlight on
//!
//! # Play a short tune
//! parallax-lcd tone 880
//! parallax-lcd length 1/8
//! parallax-lcd note C E G rest C
//!
//! # Load a 5x8 PNG into slot 0 and show it
//! parallax-lcd glyph define 0 heart.png
//! parallax-lcd glyph show 0
//!
//! # Print the bytes instead of sending them
//! parallax-lcd --dry-run goto 3 19
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

use parallax_lcd::{
    Lcd, LcdConfig, LcdError,
    display::config::{DEFAULT_DEVICE, DisplayModel},
    protocol::{
        commands::{CursorMode, NoteLength, Pitch, Scale},
        cursor::CursorPosition,
        glyph::{GLYPH_HEIGHT, GLYPH_WIDTH, GlyphSlot, glyph_image_size, is_glyph_size},
    },
    transport::{ByteSink, Delay, ThreadSleep},
};

/// Parallax LCD - serial character display utility
#[derive(Parser, Debug)]
#[command(name = "parallax-lcd")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Serial device path
    #[arg(long, global = true, default_value = DEFAULT_DEVICE)]
    device: PathBuf,

    /// DIP-switch baud mode: 0 = 2400, 1 = 9600, 2 = 19200
    #[arg(long, global = true, default_value_t = 1)]
    mode: u8,

    /// Display model (27976, 27977, 27979, 2x16, 4x20)
    #[arg(long, global = true, default_value = "27977")]
    model: String,

    /// Print the bytes as hex instead of opening the device
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Toggle {
    On,
    Off,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Switch the backlight
    Backlight {
        #[arg(value_enum)]
        state: Toggle,
    },

    /// Clear the screen and home the cursor
    Clear,

    /// Turn the display off
    Off,

    /// Turn the display on
    On {
        /// Cursor mode: 0 = off, 1 = off + blink, 2 = on, 3 = on + blink
        #[arg(long, default_value_t = 0)]
        cursor: u8,
    },

    /// Select the speaker scale (220, 440, 880, 1760, 3520 Hz)
    Tone { scale: Scale },

    /// Set the note length (1/64, 1/32, 1/16, 1/8, 1/4, 1/2, 1)
    Length { length: NoteLength },

    /// Play notes in order (A, A#, B, C, C#, D, D#, E, F, F#, G, G#, rest)
    Note {
        #[arg(required = true)]
        notes: Vec<Pitch>,
    },

    /// Define or show custom glyphs
    Glyph {
        #[command(subcommand)]
        action: GlyphAction,
    },

    /// Move the cursor
    Goto { line: u8, column: u8 },

    /// Print text at the cursor, or at --line/--column
    Print {
        text: String,

        #[arg(long)]
        line: Option<u8>,

        #[arg(long, requires = "line", default_value_t = 0)]
        column: u8,
    },
}

#[derive(Subcommand, Debug)]
enum GlyphAction {
    /// Load a 5x8 black-on-white image into a slot (0-7)
    Define { slot: u8, image: PathBuf },

    /// Display a slot's glyph at the cursor
    Show { slot: u8 },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), LcdError> {
    let cli = Cli::parse();
    let model = DisplayModel::parse(&cli.model)?;
    let config = LcdConfig::new(cli.mode)?.with_device(cli.device);

    if cli.dry_run {
        let mut lcd = Lcd::new(Vec::new(), ThreadSleep).with_settle_delay(Duration::ZERO);
        execute(&mut lcd, cli.command, &model)?;
        let hex: Vec<String> = lcd.sink().iter().map(|b| format!("{:02X}", b)).collect();
        println!("{}", hex.join(" "));
        return Ok(());
    }

    let mut lcd = Lcd::open(&config)?;
    execute(&mut lcd, cli.command, &model)
}

/// Warn when a position exists in controller memory but not on the glass
fn check_visible(model: &DisplayModel, pos: CursorPosition) {
    if !model.is_visible(pos.line(), pos.column()) {
        eprintln!(
            "Warning: line {}, column {} is off-screen on a {} ({}x{})",
            pos.line(),
            pos.column(),
            model.name,
            model.lines,
            model.columns
        );
    }
}

fn execute<S: ByteSink, D: Delay>(
    lcd: &mut Lcd<S, D>,
    command: Commands,
    model: &DisplayModel,
) -> Result<(), LcdError> {
    match command {
        Commands::Backlight { state } => {
            if !model.backlight {
                eprintln!("Warning: model {} has no backlight", model.name);
            }
            match state {
                Toggle::On => lcd.backlight_on(),
                Toggle::Off => lcd.backlight_off(),
            }
        }
        Commands::Clear => lcd.clear_screen(),
        Commands::Off => lcd.power_off(),
        Commands::On { cursor } => lcd.power_on(CursorMode::from_index(cursor)?),
        Commands::Tone { scale } => lcd.set_tone_scale(scale),
        Commands::Length { length } => lcd.set_note_duration(length),
        Commands::Note { notes } => {
            if !model.speaker {
                eprintln!("Warning: model {} has no speaker", model.name);
            }
            for pitch in notes {
                lcd.play_note(pitch)?;
            }
            Ok(())
        }
        Commands::Glyph { action } => match action {
            GlyphAction::Define { slot, image } => {
                let slot = GlyphSlot::new(slot)?;
                let (width, height) = glyph_image_size(&image)?;
                if !is_glyph_size(width, height) {
                    eprintln!(
                        "Warning: {} is {}x{}, fitting to {}x{}",
                        image.display(),
                        width,
                        height,
                        GLYPH_WIDTH,
                        GLYPH_HEIGHT
                    );
                }
                lcd.define_glyph_from_image(slot, &image)?;
                println!("Loaded {} into slot {}", image.display(), slot.index());
                Ok(())
            }
            GlyphAction::Show { slot } => lcd.show_glyph(GlyphSlot::new(slot)?),
        },
        Commands::Goto { line, column } => {
            let pos = CursorPosition::new(line, column)?;
            check_visible(model, pos);
            lcd.goto(pos)
        }
        Commands::Print { text, line, column } => match line {
            Some(line) => {
                let pos = CursorPosition::new(line, column)?;
                check_visible(model, pos);
                lcd.print_text_at(pos, &text)
            }
            None => lcd.print_text(&text),
        },
    }
}
