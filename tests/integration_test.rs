use questionset::{cli, storage::Storage, QuestionType};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn store_path(temp_dir: &TempDir) -> PathBuf {
    temp_dir.path().join(".questionset").join("questions.json")
}

async fn seed(path: &Path) {
    cli::handle_add(path, 1, "Addition".to_string(), QuestionType::ShortAnswerQuestion)
        .await
        .unwrap();
    cli::handle_add(path, 2, "Letters".to_string(), QuestionType::ShortAnswerQuestion)
        .await
        .unwrap();
    cli::handle_add(path, 5, "Colors".to_string(), QuestionType::MultipleChoiceQuestion)
        .await
        .unwrap();
}

fn ids(storage: &Storage) -> Vec<i64> {
    storage.questions.iter().map(|q| q.id).collect()
}

#[tokio::test]
async fn test_end_to_end_workflow() {
    let temp_dir = TempDir::new().unwrap();
    let path = store_path(&temp_dir);

    seed(&path).await;

    // Verify they were added in order
    let storage = Storage::load(&path).await.unwrap();
    assert_eq!(ids(&storage), vec![1, 2, 5]);
    assert!(storage.updated_at.is_some());

    // Read-only commands
    cli::handle_list(&path).await.unwrap();
    cli::handle_csv(&path).await.unwrap();
    cli::handle_answers(&path).await.unwrap();
    cli::handle_points(&path, true).await.unwrap();
    cli::handle_show(&path, 5).await.unwrap();

    // Remove a question
    cli::handle_remove(&path, 2).await.unwrap();

    let storage = Storage::load(&path).await.unwrap();
    assert_eq!(ids(&storage), vec![1, 5]);
}

#[tokio::test]
async fn test_add_duplicate_id() {
    let temp_dir = TempDir::new().unwrap();
    let path = store_path(&temp_dir);
    seed(&path).await;

    let result =
        cli::handle_add(&path, 2, "Again".to_string(), QuestionType::ShortAnswerQuestion).await;
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("already exists"));
}

#[tokio::test]
async fn test_missing_ids_are_errors() {
    let temp_dir = TempDir::new().unwrap();
    let path = store_path(&temp_dir);
    seed(&path).await;

    let remove = cli::handle_remove(&path, 404).await;
    assert!(remove.unwrap_err().to_string().contains("not found"));

    assert!(cli::handle_show(&path, 404).await.is_err());
    assert!(cli::handle_rename(&path, 404, "x".to_string()).await.is_err());
    assert!(cli::handle_duplicate(&path, 404, 7).await.is_err());
    assert!(
        cli::handle_set_type(&path, 404, QuestionType::ShortAnswerQuestion)
            .await
            .is_err()
    );

    // Nothing changed on disk
    let storage = Storage::load(&path).await.unwrap();
    assert_eq!(ids(&storage), vec![1, 2, 5]);
}

#[tokio::test]
async fn test_option_editing_and_type_change() {
    let temp_dir = TempDir::new().unwrap();
    let path = store_path(&temp_dir);
    seed(&path).await;

    cli::handle_edit_option(&path, 5, -1, "red".to_string())
        .await
        .unwrap();
    cli::handle_edit_option(&path, 5, -1, "apple".to_string())
        .await
        .unwrap();
    cli::handle_edit_option(&path, 5, 1, "blue".to_string())
        .await
        .unwrap();

    let storage = Storage::load(&path).await.unwrap();
    assert_eq!(storage.questions[2].options, vec!["red", "blue"]);

    // Out of range and negative indices are rejected
    let out_of_range = cli::handle_edit_option(&path, 5, 2, "green".to_string()).await;
    assert!(out_of_range.unwrap_err().to_string().contains("out of range"));
    assert!(cli::handle_edit_option(&path, 5, -3, "green".to_string())
        .await
        .is_err());

    cli::handle_set_type(&path, 5, QuestionType::ShortAnswerQuestion)
        .await
        .unwrap();

    let storage = Storage::load(&path).await.unwrap();
    assert_eq!(
        storage.questions[2].question_type,
        QuestionType::ShortAnswerQuestion
    );
    assert!(storage.questions[2].options.is_empty());
}

#[tokio::test]
async fn test_rename_duplicate_and_publish() {
    let temp_dir = TempDir::new().unwrap();
    let path = store_path(&temp_dir);
    seed(&path).await;

    cli::handle_rename(&path, 2, "Alphabet".to_string())
        .await
        .unwrap();
    cli::handle_duplicate(&path, 2, 99).await.unwrap();

    // New id must be free
    assert!(cli::handle_duplicate(&path, 1, 99).await.is_err());

    let storage = Storage::load(&path).await.unwrap();
    assert_eq!(ids(&storage), vec![1, 2, 99, 5]);
    assert_eq!(storage.questions[2].name, "Alphabet");
    assert!(storage.questions.iter().all(|q| !q.published));

    cli::handle_publish_all(&path).await.unwrap();

    let storage = Storage::load(&path).await.unwrap();
    assert!(storage.questions.iter().all(|q| q.published));
    assert_eq!(
        questionset::question_set::to_csv(&storage.questions),
        "id,name,options,points,published\n\
         1,Addition,0,0,true\n\
         2,Alphabet,0,0,true\n\
         99,Alphabet,0,0,true\n\
         5,Colors,0,0,true"
    );
}

#[tokio::test]
async fn test_empty_store_commands() {
    let temp_dir = TempDir::new().unwrap();
    let path = store_path(&temp_dir);

    cli::handle_list(&path).await.unwrap();
    cli::handle_csv(&path).await.unwrap();
    cli::handle_same_type(&path).await.unwrap();
    cli::handle_names(&path).await.unwrap();
    cli::handle_publish_all(&path).await.unwrap();

    let storage = Storage::load(&path).await.unwrap();
    assert!(storage.questions.is_empty());
    assert!(questionset::question_set::same_type(&storage.questions));
}

#[tokio::test]
async fn test_edit_option_checks_every_repeated_id() {
    let temp_dir = TempDir::new().unwrap();
    let path = store_path(&temp_dir);

    let mut wide = questionset::question::make_blank_question(
        3,
        "Wide",
        QuestionType::MultipleChoiceQuestion,
    );
    wide.options = vec!["a".to_string(), "b".to_string()];
    let mut narrow = questionset::question::make_blank_question(
        3,
        "Narrow",
        QuestionType::MultipleChoiceQuestion,
    );
    narrow.options = vec!["c".to_string()];

    let mut storage = Storage::new();
    storage.questions = vec![wide, narrow];
    storage.save(&path).await.unwrap();
    let before = Storage::load(&path).await.unwrap();

    let result = cli::handle_edit_option(&path, 3, 1, "z".to_string()).await;
    assert!(result.unwrap_err().to_string().contains("out of range"));

    // Nothing changed on disk
    let after = Storage::load(&path).await.unwrap();
    assert_eq!(after, before);

    // An index both questions have is applied to both
    cli::handle_edit_option(&path, 3, 0, "z".to_string())
        .await
        .unwrap();
    let storage = Storage::load(&path).await.unwrap();
    assert_eq!(storage.questions[0].options, vec!["z", "b"]);
    assert_eq!(storage.questions[1].options, vec!["z"]);
}
