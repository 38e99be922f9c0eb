use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "hireflow")]
#[command(about = "Webinar voice-interview booking service", long_about = None)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Run the HTTP service (default when no command is given)
    Serve,
    /// Print version information
    Version,
    /// Manage Vapi voice assistants
    Assistant(AssistantCliArgs),
    /// Create and inspect webinars
    Webinar(WebinarCliArgs),
    /// Register attendees and manage their calls
    Attendee(AttendeeCliArgs),
}

#[derive(ClapArgs, Debug)]
pub struct AssistantCliArgs {
    #[command(subcommand)]
    pub command: AssistantCommand,
}

#[derive(Subcommand, Debug)]
pub enum AssistantCommand {
    /// List assistants on the Vapi account
    List,
    /// Create an assistant with the interview configuration
    Create {
        /// Display name (prompted for when omitted)
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Re-apply the interview configuration to an assistant
    Update {
        /// Assistant ID
        id: String,
        /// Replace the greeting spoken when the call starts
        #[arg(long)]
        first_message: Option<String>,
        /// Replace the interviewer system prompt
        #[arg(long)]
        system_prompt: Option<String>,
    },
}

#[derive(ClapArgs, Debug)]
pub struct WebinarCliArgs {
    #[command(subcommand)]
    pub command: WebinarCommand,
}

#[derive(Subcommand, Debug)]
pub enum WebinarCommand {
    /// Create a webinar
    Create {
        #[arg(short, long)]
        title: String,
        #[arg(short, long)]
        description: Option<String>,
        /// SCHEDULED, WAITING_ROOM, LIVE or ENDED
        #[arg(long, default_value = "SCHEDULED")]
        status: String,
        /// BOOK_A_CALL or BUY_NOW
        #[arg(long, default_value = "BOOK_A_CALL")]
        cta: String,
        #[arg(long)]
        cta_label: Option<String>,
        /// Assistant ID that runs the calls
        #[arg(short, long)]
        assistant: Option<String>,
        /// Comma separated pipeline tags
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,
        /// Start time (RFC 3339, defaults to now)
        #[arg(long)]
        start_time: Option<String>,
    },
    /// List webinars, newest first
    List {
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Show one webinar
    Show { id: String },
    /// Change the webinar lifecycle status
    Status { id: String, status: String },
    /// Attach an assistant to a webinar, or detach it with --clear
    Assign {
        id: String,
        #[arg(required_unless_present = "clear")]
        assistant_id: Option<String>,
        #[arg(long)]
        clear: bool,
    },
    /// Change the call-to-action shown during the webinar
    Cta {
        id: String,
        /// BOOK_A_CALL or BUY_NOW
        cta: String,
        #[arg(long)]
        label: Option<String>,
    },
    /// Print the attendee pipeline board
    Pipeline { id: String },
}

#[derive(ClapArgs, Debug)]
pub struct AttendeeCliArgs {
    #[command(subcommand)]
    pub command: AttendeeCommand,
}

#[derive(Subcommand, Debug)]
pub enum AttendeeCommand {
    /// Register an attendee for a webinar
    Register {
        #[arg(short, long)]
        webinar: String,
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        email: String,
    },
    /// List attendees of a webinar
    List {
        #[arg(short, long)]
        webinar: String,
    },
    /// Set an attendee's call status (PENDING, InProgress, COMPLETED)
    CallStatus {
        id: String,
        status: String,
        #[arg(short, long)]
        webinar: String,
    },
    /// Move an attendee to another pipeline stage
    Stage {
        id: String,
        stage: String,
        #[arg(short, long)]
        webinar: String,
    },
    /// Run the call admission check as the call page would
    Admit {
        #[arg(short, long)]
        webinar: String,
        #[arg(short, long)]
        attendee: String,
    },
}
