//! End-to-end command flows through the conversation state machine with a
//! scripted remote source.

mod common;

use common::{context, MockSource};
use pretty_assertions::assert_eq;

use bgkbot::commands::Registry;
use bgkbot::session::Sessions;
use teloxide::types::{ChatId, InlineKeyboardButtonKind};

const CHAT: ChatId = ChatId(42);

fn sessions() -> Sessions {
    Sessions::new(Registry::default())
}

#[tokio::test]
async fn test_start_greets() {
    let ctx = context(MockSource::new(), &[]);
    let reply = sessions().handle(CHAT, "/start", &ctx).await.unwrap();
    assert_eq!(
        reply.text,
        "Здравствуйте, вас приветствует бот\\-помощник для канала [BGK](t.me/bg\\_kutaisi)"
    );
    assert!(reply.markdown);
}

#[tokio::test]
async fn test_collection_prompt_single_owner() {
    let ctx = context(MockSource::new().with_user("alice", "Алиса"), &["alice"]);
    let reply = sessions().handle(CHAT, "/collection", &ctx).await.unwrap();
    assert_eq!(
        reply.text,
        "Настольные игры для игротек хранятся в коллекции \
         [alice](tesera.ru/user/alice/games/owns/) \\(Алиса\\)\\. \
         Чью коллекцию вы хотите посмотреть?"
    );
}

#[tokio::test]
async fn test_collection_prompt_two_owners_joined_with_and() {
    let source = MockSource::new()
        .with_user("alice", "Алиса")
        .with_user("bob", "Боб");
    let ctx = context(source, &["alice", "bob"]);
    let reply = sessions().handle(CHAT, "/collection", &ctx).await.unwrap();
    assert!(
        reply.text.contains(
            "коллекциях [alice](tesera.ru/user/alice/games/owns/) \\(Алиса\\) \
             и [bob](tesera.ru/user/bob/games/owns/) \\(Боб\\)\\."
        ),
        "got: {}",
        reply.text
    );
}

#[tokio::test]
async fn test_collection_prompt_three_owners_comma_joined() {
    let source = MockSource::new()
        .with_user("alice", "Алиса")
        .with_user("bob", "Боб")
        .with_user("carol", "Кэрол");
    let ctx = context(source, &["alice", "bob", "carol"]);
    let reply = sessions().handle(CHAT, "/collection", &ctx).await.unwrap();
    assert!(
        reply.text.contains("коллекциях: [alice]"),
        "got: {}",
        reply.text
    );
    assert!(
        reply.text.contains("\\(Алиса\\), [bob]"),
        "expected comma join, got: {}",
        reply.text
    );
    assert!(
        reply.text.contains("\\(Боб\\), [carol]"),
        "expected comma join, got: {}",
        reply.text
    );
    assert!(!reply.text.contains(" и [") , "no 'и' join for three owners: {}", reply.text);
}

#[tokio::test]
async fn test_collection_prompt_buttons_start_with_title_sort() {
    let ctx = context(MockSource::new().with_user("alice", "Алиса"), &["alice"]);
    let reply = sessions().handle(CHAT, "/collection", &ctx).await.unwrap();
    let keyboard = reply.reply_markup.expect("prompt should carry owner buttons");
    let button = &keyboard.inline_keyboard[0][0];
    assert_eq!(button.text, "alice(Алиса)");
    match &button.kind {
        InlineKeyboardButtonKind::CallbackData(data) => {
            assert_eq!(data, "Collection;GetCollection;alice;Titles");
        }
        other => panic!("unexpected button kind: {:?}", other),
    }
}

#[tokio::test]
async fn test_collection_without_configured_owners_cancels() {
    let ctx = context(MockSource::new(), &[]);
    let machine = sessions();
    let reply = machine.handle(CHAT, "/collection", &ctx).await.unwrap();
    assert_eq!(
        reply.text,
        "Выполнение /collection отменено. Причина: \
         в переменных среды отсутствуют логины пользователей Tesera.ru"
    );
    assert!(!machine.has_session(CHAT).await);
}

#[tokio::test]
async fn test_collection_with_unreachable_source_cancels_without_residue() {
    // Owners configured, but every user-info fetch returns nothing
    let ctx = context(MockSource::new(), &["alice", "bob"]);
    let machine = sessions();
    let reply = machine.handle(CHAT, "/collection", &ctx).await.unwrap();
    assert_eq!(
        reply.text,
        "Выполнение /collection отменено. Причина: \
         не удалось получить данные пользователей Tesera.ru"
    );
    assert!(!machine.has_session(CHAT).await);
}

#[tokio::test]
async fn test_plain_text_is_not_understood_and_creates_no_session() {
    let ctx = context(MockSource::new(), &[]);
    let machine = sessions();
    let reply = machine.handle(CHAT, "когда игротека?", &ctx).await.unwrap();
    assert_eq!(
        reply.text,
        "\"когда игротека?\" не является командой или ответом на выполняемую команду"
    );
    assert!(!machine.has_session(CHAT).await);
}

#[tokio::test]
async fn test_unknown_slash_command() {
    let ctx = context(MockSource::new(), &[]);
    let reply = sessions().handle(CHAT, "/frobnicate", &ctx).await.unwrap();
    assert_eq!(reply.text, "\"frobnicate\" не является командой");
}

#[tokio::test]
async fn test_same_updates_same_replies() {
    // Fixed mocks + same inbound sequence => same outbound sequence
    let source = || MockSource::new().with_user("alice", "Алиса");
    let ctx_a = context(source(), &["alice"]);
    let ctx_b = context(source(), &["alice"]);

    let run = |ctx| async move {
        let machine = sessions();
        let mut replies = Vec::new();
        for text in ["/start", "/collection", "хм"] {
            replies.push(machine.handle(CHAT, text, &ctx).await);
        }
        replies
    };

    assert_eq!(run(ctx_a).await, run(ctx_b).await);
}
