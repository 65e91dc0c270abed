use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "forma", version, about = "CLI workout tracker")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Emit machine-readable JSON instead of colorful text.
    #[arg(global = true, long)]
    pub json: bool,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Weekly plan: view and adjust exercises
    #[command(subcommand, visible_alias = "p")]
    Plan(PlanCmd),

    /// Guided workout mode for one training day
    #[command(subcommand, visible_alias = "w")]
    Workout(WorkoutCmd),

    /// Body measurements
    #[command(subcommand, visible_alias = "m")]
    Measure(MeasureCmd),

    /// Today's meal checklist
    #[command(subcommand)]
    Meals(MealsCmd),

    /// App settings (theme, units, language, ...)
    #[command(subcommand)]
    Settings(SettingsCmd),

    /// View or edit forma config (sync credentials)
    #[command(subcommand)]
    Config(ConfigCmd),

    /// Reconcile the local plan and measurements with the cloud
    Sync,

    /// Show training progress and statistics
    Status {
        /// Show progress for a specific muscle group
        #[arg(short, long)]
        muscle: Option<String>,
    },

    /// Db operations
    #[command(subcommand)]
    Db(DbCmd),
}

//
// Commands
//

#[derive(Subcommand)]
pub enum PlanCmd {
    /// Show the weekly plan, or one day in detail
    #[command(visible_alias = "s")]
    Show {
        /// Day index (from `plan show`), id or name
        day: Option<String>,
    },

    /// Set the weight of one set - Usage: plan set-weight DAY EXERCISE SET WEIGHT
    #[command(visible_alias = "sw")]
    SetWeight {
        /// Day index, id or name
        day: String,

        /// Exercise index, id or name within the day
        exercise: String,

        /// 1-based set number
        set: usize,

        /// Weight in the configured unit
        weight: f64,
    },

    /// Set the rep target of one set - Usage: plan set-reps DAY EXERCISE SET REPS
    #[command(visible_alias = "sr")]
    SetReps {
        day: String,
        exercise: String,

        /// 1-based set number
        set: usize,

        /// Number of reps (must be > 0)
        reps: u32,
    },

    /// Mark one set as completed
    #[command(visible_alias = "d")]
    Done {
        day: String,
        exercise: String,

        /// 1-based set number
        set: usize,
    },

    /// Manually toggle an exercise's completed flag
    #[command(visible_alias = "t")]
    Toggle { day: String, exercise: String },

    /// Attach a note to an exercise
    #[command(visible_alias = "n")]
    Note {
        day: String,
        exercise: String,

        /// Free-form text
        note: String,
    },

    /// Reset the plan to the built-in template (drops all progress)
    Reset {
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum WorkoutCmd {
    /// Start (or resume) a workout for a training day
    #[command(visible_alias = "s")]
    Start {
        /// Day index, id or name
        day: String,
    },

    /// Show where you are in the current workout
    #[command(visible_alias = "i")]
    Status,

    /// Complete the current set
    #[command(visible_alias = "d")]
    Done,

    /// Finish the rest period and move to the next set
    #[command(visible_alias = "r")]
    Rest,

    /// Jump to the next exercise
    Next,

    /// Jump back to the previous exercise
    Prev,

    /// Leave workout mode and clear the saved position
    Exit,
}

#[derive(Subcommand)]
pub enum MeasureCmd {
    /// Record a body measurement
    #[command(visible_alias = "a")]
    Add {
        /// Body weight in the configured unit
        weight: f64,

        /// Height in cm
        #[arg(long)]
        height: Option<f64>,

        /// Body fat percentage
        #[arg(long = "body-fat")]
        body_fat: Option<f64>,

        /// Chest girth in cm
        #[arg(long)]
        chest: Option<f64>,

        /// Waist girth in cm
        #[arg(long)]
        waist: Option<f64>,

        /// Hip girth in cm
        #[arg(long)]
        hips: Option<f64>,

        /// Arm girth in cm
        #[arg(long)]
        arms: Option<f64>,

        /// Thigh girth in cm
        #[arg(long)]
        thighs: Option<f64>,

        /// Free-form note
        #[arg(long)]
        notes: Option<String>,

        /// Measurement date (ISO), defaults to now
        #[arg(long)]
        date: Option<String>,
    },

    /// List recorded measurements, newest first
    #[command(visible_alias = "l")]
    List {
        /// Show at most this many entries
        #[arg(short, long)]
        limit: Option<usize>,

        /// Show an ASCII graph of body weight over time
        #[arg(short, long)]
        graph: bool,
    },
}

#[derive(Subcommand)]
pub enum MealsCmd {
    /// Show today's meal checklist
    #[command(visible_alias = "s")]
    Show,

    /// Mark a meal as eaten
    Eat {
        /// 1-based meal index (from `meals show`)
        meal: usize,
    },

    /// Un-mark a meal
    Uneat {
        /// 1-based meal index (from `meals show`)
        meal: usize,
    },
}

#[derive(Subcommand)]
pub enum SettingsCmd {
    /// Show all settings
    Show,

    /// Change a setting - keys: theme, notifications, auto-suggest, unit, language
    Set { key: String, value: String },
}

#[derive(Subcommand)]
pub enum ConfigCmd {
    /// Show all config keys
    List,

    /// Get the value of a key
    Get { key: String },

    /// Set or override a key
    Set { key: String, val: String },

    /// Remove a key
    Unset { key: String },
}

#[derive(Subcommand)]
pub enum DbCmd {
    /// Export plan and settings to a JSON snapshot
    Export {
        /// Output file path (defaults to forma-backup-YYYY-MM-DD.json)
        #[arg(short, long)]
        file: Option<String>,
    },

    /// Import a JSON snapshot (overwrites the stored plan only)
    Import {
        /// Input JSON file path
        file: String,
    },
}
