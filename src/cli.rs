use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;
use std::path::{Path, PathBuf};

use crate::question::{Question, QuestionType};
use crate::question_set::{self, OptionSlot};
use crate::storage::Storage;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Question file (defaults to $QUESTIONSET_FILE or ~/.questionset/questions.json)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all questions
    List,

    /// List published questions
    Published,

    /// List questions with a body, expected answer or options
    NonEmpty,

    /// Show one question as JSON
    Show {
        #[arg(short, long)]
        id: i64,
    },

    /// Print question names
    Names,

    /// Print the point total
    Points {
        /// Only count published questions
        #[arg(short, long)]
        published: bool,
    },

    /// Print the question set as CSV
    Csv,

    /// Print a blank answer sheet as JSON
    Answers,

    /// Check whether all questions share one type
    SameType,

    /// Append a blank question
    Add {
        #[arg(short, long)]
        id: i64,

        #[arg(short, long)]
        name: String,

        #[arg(short = 't', long = "type", value_enum)]
        question_type: QuestionType,
    },

    /// Remove every question with the given id
    Remove {
        #[arg(short, long)]
        id: i64,
    },

    /// Rename a question
    Rename {
        #[arg(short, long)]
        id: i64,

        #[arg(short, long)]
        name: String,
    },

    /// Change a question's type (non multiple choice clears options)
    SetType {
        #[arg(short, long)]
        id: i64,

        #[arg(short = 't', long = "type", value_enum)]
        question_type: QuestionType,
    },

    /// Replace an option, or append it with --index -1
    EditOption {
        #[arg(short, long)]
        id: i64,

        /// Option position, -1 to append
        #[arg(short = 'x', long, allow_hyphen_values = true)]
        index: i64,

        #[arg(short, long)]
        option: String,
    },

    /// Copy a question in place under a new id
    Duplicate {
        #[arg(short, long)]
        id: i64,

        #[arg(short, long)]
        new_id: i64,
    },

    /// Mark every question as published
    PublishAll,
}

pub async fn run(cli: Cli) -> Result<()> {
    let path = Storage::resolve_path(cli.file)?;
    info!("Using question file {}", path.display());

    match cli.command {
        Commands::List => handle_list(&path).await,
        Commands::Published => handle_published(&path).await,
        Commands::NonEmpty => handle_non_empty(&path).await,
        Commands::Show { id } => handle_show(&path, id).await,
        Commands::Names => handle_names(&path).await,
        Commands::Points { published } => handle_points(&path, published).await,
        Commands::Csv => handle_csv(&path).await,
        Commands::Answers => handle_answers(&path).await,
        Commands::SameType => handle_same_type(&path).await,
        Commands::Add {
            id,
            name,
            question_type,
        } => handle_add(&path, id, name, question_type).await,
        Commands::Remove { id } => handle_remove(&path, id).await,
        Commands::Rename { id, name } => handle_rename(&path, id, name).await,
        Commands::SetType { id, question_type } => {
            handle_set_type(&path, id, question_type).await
        }
        Commands::EditOption { id, index, option } => {
            handle_edit_option(&path, id, index, option).await
        }
        Commands::Duplicate { id, new_id } => handle_duplicate(&path, id, new_id).await,
        Commands::PublishAll => handle_publish_all(&path).await,
    }
}

fn print_table(questions: &[Question]) {
    if questions.is_empty() {
        println!("No questions");
        return;
    }

    println!(
        "{:<8} {:<24} {:<26} {:<8} {:<8} {:<10}",
        "ID", "NAME", "TYPE", "OPTIONS", "POINTS", "STATUS"
    );
    println!("{}", "-".repeat(89));

    for question in questions {
        let name = if question.name.chars().count() > 21 {
            format!("{}...", question.name.chars().take(21).collect::<String>())
        } else {
            question.name.clone()
        };

        let status = if question.published {
            "Published"
        } else {
            "Draft"
        };

        println!(
            "{:<8} {:<24} {:<26} {:<8} {:<8} {:<10}",
            question.id,
            name,
            question.question_type.to_string(),
            question.options.len(),
            question.points,
            status
        );
    }
}

fn ensure_exists(storage: &Storage, id: i64) -> Result<()> {
    if question_set::find_question(&storage.questions, id).is_none() {
        return Err(anyhow::anyhow!("Question with id {} not found", id));
    }
    Ok(())
}

pub async fn handle_list(path: &Path) -> Result<()> {
    let storage = Storage::load(path).await?;
    print_table(&storage.questions);
    Ok(())
}

pub async fn handle_published(path: &Path) -> Result<()> {
    let storage = Storage::load(path).await?;
    print_table(&question_set::get_published_questions(&storage.questions));
    Ok(())
}

pub async fn handle_non_empty(path: &Path) -> Result<()> {
    let storage = Storage::load(path).await?;
    print_table(&question_set::get_non_empty_questions(&storage.questions));
    Ok(())
}

pub async fn handle_show(path: &Path, id: i64) -> Result<()> {
    let storage = Storage::load(path).await?;
    let question = question_set::find_question(&storage.questions, id)
        .ok_or_else(|| anyhow::anyhow!("Question with id {} not found", id))?;
    println!("{}", serde_json::to_string_pretty(&question)?);
    Ok(())
}

pub async fn handle_names(path: &Path) -> Result<()> {
    let storage = Storage::load(path).await?;
    for name in question_set::get_names(&storage.questions) {
        println!("{name}");
    }
    Ok(())
}

pub async fn handle_points(path: &Path, published: bool) -> Result<()> {
    let storage = Storage::load(path).await?;
    let total = if published {
        question_set::sum_published_points(&storage.questions)
    } else {
        question_set::sum_points(&storage.questions)
    };
    println!("{total}");
    Ok(())
}

pub async fn handle_csv(path: &Path) -> Result<()> {
    let storage = Storage::load(path).await?;
    println!("{}", question_set::to_csv(&storage.questions));
    Ok(())
}

pub async fn handle_answers(path: &Path) -> Result<()> {
    let storage = Storage::load(path).await?;
    let answers = question_set::make_answers(&storage.questions);
    println!("{}", serde_json::to_string_pretty(&answers)?);
    Ok(())
}

pub async fn handle_same_type(path: &Path) -> Result<()> {
    let storage = Storage::load(path).await?;
    println!("{}", question_set::same_type(&storage.questions));
    Ok(())
}

pub async fn handle_add(
    path: &Path,
    id: i64,
    name: String,
    question_type: QuestionType,
) -> Result<()> {
    let mut storage = Storage::load(path).await?;

    // Check if id already exists
    if storage.questions.iter().any(|q| q.id == id) {
        return Err(anyhow::anyhow!("Question with id {} already exists", id));
    }

    storage.questions = question_set::add_new_question(&storage.questions, id, &name, question_type);
    storage.save(path).await?;

    info!("Added question {id} ({question_type})");
    println!("Question {id} '{name}' added successfully");
    Ok(())
}

pub async fn handle_remove(path: &Path, id: i64) -> Result<()> {
    let mut storage = Storage::load(path).await?;

    let initial_count = storage.questions.len();
    storage.questions = question_set::remove_question(&storage.questions, id);

    if storage.questions.len() == initial_count {
        return Err(anyhow::anyhow!("Question with id {} not found", id));
    }

    storage.save(path).await?;
    println!(
        "Removed {} question(s) with id {id}",
        initial_count - storage.questions.len()
    );
    Ok(())
}

pub async fn handle_rename(path: &Path, id: i64, name: String) -> Result<()> {
    let mut storage = Storage::load(path).await?;
    ensure_exists(&storage, id)?;

    storage.questions = question_set::rename_question_by_id(&storage.questions, id, &name);
    storage.save(path).await?;

    println!("Question {id} renamed to '{name}'");
    Ok(())
}

pub async fn handle_set_type(path: &Path, id: i64, question_type: QuestionType) -> Result<()> {
    let mut storage = Storage::load(path).await?;
    ensure_exists(&storage, id)?;

    storage.questions =
        question_set::change_question_type_by_id(&storage.questions, id, question_type);
    storage.save(path).await?;

    println!("Question {id} is now {question_type}");
    Ok(())
}

pub async fn handle_edit_option(path: &Path, id: i64, index: i64, option: String) -> Result<()> {
    let slot = OptionSlot::from_index(index)
        .ok_or_else(|| anyhow::anyhow!("Invalid option index {}: use -1 to append", index))?;

    let mut storage = Storage::load(path).await?;
    ensure_exists(&storage, id)?;

    // Every question with this id must have the slot
    if let OptionSlot::At(position) = slot {
        if let Some(question) = storage
            .questions
            .iter()
            .find(|q| q.id == id && position >= q.options.len())
        {
            return Err(anyhow::anyhow!(
                "Option index {} out of range: question {} has {} option(s)",
                position,
                id,
                question.options.len()
            ));
        }
    }

    storage.questions = question_set::edit_option(&storage.questions, id, slot, &option);
    storage.save(path).await?;

    match slot {
        OptionSlot::Append => println!("Appended option '{option}' to question {id}"),
        OptionSlot::At(position) => {
            println!("Replaced option {position} of question {id} with '{option}'")
        }
    }
    Ok(())
}

pub async fn handle_duplicate(path: &Path, id: i64, new_id: i64) -> Result<()> {
    let mut storage = Storage::load(path).await?;
    ensure_exists(&storage, id)?;

    if storage.questions.iter().any(|q| q.id == new_id) {
        return Err(anyhow::anyhow!("Question with id {} already exists", new_id));
    }

    storage.questions = question_set::duplicate_question_in_array(&storage.questions, id, new_id);
    storage.save(path).await?;

    println!("Question {id} duplicated as {new_id}");
    Ok(())
}

pub async fn handle_publish_all(path: &Path) -> Result<()> {
    let mut storage = Storage::load(path).await?;

    let draft_count = storage.questions.iter().filter(|q| !q.published).count();
    storage.questions = question_set::publish_all(&storage.questions);
    storage.save(path).await?;

    if draft_count > 0 {
        println!("Published {draft_count} draft question(s)");
    } else {
        println!("All questions are already published");
    }
    Ok(())
}
