use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "geogenie")]
#[command(about = "Snap a monument, learn about it, help improve recognition", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose diagnostics on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Backend base URL (overrides config and GEOGENIE_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and keep the session token
    Login {
        #[arg(short, long)]
        username: String,

        /// Password (prompted when omitted)
        #[arg(short, long, env = "GEOGENIE_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Create an account
    Register {
        #[arg(short, long)]
        username: String,

        /// Password (prompted when omitted)
        #[arg(short, long, env = "GEOGENIE_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Show the current identity
    Me,

    /// Recognize the landmark in a photo
    Recognize {
        /// Photo to upload
        #[arg(required = true)]
        image: PathBuf,

        #[arg(long, allow_hyphen_values = true, requires = "lng")]
        lat: Option<f64>,

        #[arg(long, allow_hyphen_values = true, requires = "lat")]
        lng: Option<f64>,

        /// Send the coordinates stored in the photo's EXIF data
        #[arg(long, conflicts_with = "lat")]
        use_photo_location: bool,

        /// Print the result without offering follow-up actions
        #[arg(long)]
        no_prompt: bool,
    },

    /// List known landmarks
    Landmarks {
        /// Names only
        #[arg(long)]
        names: bool,
    },

    /// Register a new landmark name
    AddLandmark {
        #[arg(required = true)]
        name: String,
    },

    /// Submit a photo with landmark details to improve recognition
    Feedback {
        /// Photo to submit
        #[arg(short, long)]
        image: Option<PathBuf>,

        /// Landmark name (existing or new)
        #[arg(short, long)]
        landmark: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        lat: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        lng: Option<String>,

        /// Attach details to an image uploaded earlier instead of uploading
        #[arg(long)]
        image_id: Option<String>,
    },

    /// Chat about a place
    Chat {
        /// Place name (prompted when omitted)
        #[arg(short, long)]
        place: Option<String>,

        /// Send one message and exit
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Show or edit settings
    Config {
        /// Set the backend base URL
        #[arg(long)]
        set_base_url: Option<String>,

        /// Set the request timeout in seconds
        #[arg(long)]
        set_timeout: Option<u64>,

        /// Forget the stored session token
        #[arg(long)]
        logout: bool,

        /// Print settings
        #[arg(long)]
        show: bool,
    },
}
