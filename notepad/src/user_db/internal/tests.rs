use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Barrier, Mutex};
use std::time::Duration;
use argon2::PasswordHash;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use tokio::io;
use tokio::time::timeout;

use crate::hasher::{HasherError, ProductionHasherConfig};
use super::*;

struct TestUserDbIo {
    contents: Mutex<Option<String>>,
    writes: AtomicUsize,
    fail_writes: AtomicBool,
}

impl TestUserDbIo {
    fn new(contents: Option<&str>) -> Self {
        TestUserDbIo {
            contents: Mutex::new(contents.map(str::to_owned)),
            writes: AtomicUsize::new(0),
            fail_writes: AtomicBool::new(false),
        }
    }

    fn contents(&self) -> Option<String> {
        self.contents.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserDbIo for TestUserDbIo {
    async fn read_users(&self) -> io::Result<Option<String>> {
        Ok(self.contents())
    }

    async fn write_users(&self, data: String) -> io::Result<()> {
        if self.fail_writes.load(Ordering::Relaxed) {
            return Err(io::Error::from(io::ErrorKind::StorageFull));
        }
        self.writes.fetch_add(1, Ordering::Relaxed);
        *self.contents.lock().unwrap() = Some(data);
        Ok(())
    }
}

fn make_hasher() -> ProductionHasher {
    ProductionHasher::new(
        ProductionHasherConfig::new(
            argon2::Params::new(64, 1, 1, Some(32)).unwrap(),
        ),
    )
}

/// Counts hash checks. With `gated` set, `generate_hash` waits on `entered`
/// and then on `release` before doing any work.
struct TestHasher {
    inner: ProductionHasher,
    checks: AtomicUsize,
    gated: AtomicBool,
    entered: Barrier,
    release: Barrier,
}

impl TestHasher {
    fn new() -> Self {
        TestHasher {
            inner: make_hasher(),
            checks: AtomicUsize::new(0),
            gated: AtomicBool::new(false),
            entered: Barrier::new(2),
            release: Barrier::new(2),
        }
    }
}

impl Hasher for TestHasher {
    fn generate_hash(&self, password: &str) -> Result<PasswordHashString, HasherError> {
        if self.gated.load(Ordering::Relaxed) {
            self.entered.wait();
            self.release.wait();
        }
        self.inner.generate_hash(password)
    }

    fn check_hash(
        &self,
        hash: PasswordHash<'_>,
        password: &str,
    ) -> Result<bool, HasherError> {
        self.checks.fetch_add(1, Ordering::Relaxed);
        self.inner.check_hash(hash, password)
    }
}

async fn make_db(
    contents: Option<&str>,
) -> Result<UserDbImpl<ProductionHasher, TestUserDbIo>, UserDbError> {
    UserDbImpl::new_internal(make_hasher(), TestUserDbIo::new(contents), 8).await
}

fn user(name: &str) -> UsernameString {
    name.parse().unwrap()
}

fn users_file(users: &[(&str, &str)]) -> String {
    let hasher = make_hasher();
    users.iter()
        .map(|(username, password)|
            format!(
                "[[user]]\nusername = \"{username}\"\nhash = \"{}\"\n\n",
                hasher.generate_hash(password).unwrap().as_str(),
            )
        )
        .collect()
}

#[tokio::test]
async fn missing_file_means_no_users() {
    let db = make_db(None).await.unwrap();
    assert!(!db.does_user_exist(&user("ann")).await.unwrap());
    assert_eq!(db.io.writes.load(Ordering::Relaxed), 0);
}

#[tokio::test]
async fn loads_users_file() {
    let file = users_file(&[("ann", "annpassword"), ("bob", "bobpassword")]);
    let db = make_db(Some(&file)).await.unwrap();
    assert!(db.does_user_exist(&user("ann")).await.unwrap());
    assert!(db.does_user_exist(&user("bob")).await.unwrap());
    assert!(!db.does_user_exist(&user("carol")).await.unwrap());
    assert!(db.check_user_credentials(&user("bob"), "bobpassword").await.unwrap());
}

#[tokio::test]
async fn empty_file_means_no_users() {
    let db = make_db(Some("")).await.unwrap();
    assert!(!db.does_user_exist(&user("ann")).await.unwrap());
}

#[tokio::test]
async fn rejects_malformed_files() {
    let err = make_db(Some("[[user]]\nusername = ")).await.err().unwrap();
    assert!(matches!(err, UserDbError::Parsing(_)), "wrong error type: {err:#?}");

    let err = make_db(Some("[[user]]\nusername = \"ann\"\nhash = \"not a phc string\"\n"))
        .await.err().unwrap();
    assert!(matches!(err, UserDbError::Parsing(_)), "wrong error type: {err:#?}");

    let err = make_db(Some("[[user]]\nusername = \"a/b\"\nhash = \"$argon2id$v=19$m=64,t=1,p=1$c2FsdHNhbHQ$aGFzaA\"\n"))
        .await.err().unwrap();
    assert!(matches!(err, UserDbError::Parsing(_)), "wrong error type: {err:#?}");

    let mut file = users_file(&[("ann", "annpassword")]);
    file.push_str("[[user]]\nusername = \"bob\"\nhash = \"x\"\nadmin = true\n");
    let err = make_db(Some(&file)).await.err().unwrap();
    assert!(matches!(err, UserDbError::Parsing(_)), "wrong error type: {err:#?}");
}

#[tokio::test]
async fn rejects_duplicate_users() {
    let file = users_file(&[("ann", "annpassword"), ("ann", "otherpassword")]);
    let err = make_db(Some(&file)).await.err().unwrap();
    assert!(
        matches!(&err, UserDbError::DuplicateUser(name) if &**name == "ann"),
        "wrong error type: {err:#?}",
    );
}

#[tokio::test]
async fn check_credentials() {
    let file = users_file(&[("ann", "annpassword")]);
    let db = make_db(Some(&file)).await.unwrap();
    assert!(db.check_user_credentials(&user("ann"), "annpassword").await.unwrap());
    assert!(!db.check_user_credentials(&user("ann"), "wrongpassword").await.unwrap());
    assert!(!db.check_user_credentials(&user("nobody"), "annpassword").await.unwrap());
}

#[tokio::test]
async fn register_and_log_in() {
    let db = make_db(None).await.unwrap();
    let ann = user("ann");
    db.register_user(&ann, "12345678", "12345678").await.unwrap();
    assert!(db.does_user_exist(&ann).await.unwrap());
    assert!(db.check_user_credentials(&ann, "12345678").await.unwrap());
    assert!(!db.check_user_credentials(&ann, "87654321").await.unwrap());
    assert_eq!(db.io.writes.load(Ordering::Relaxed), 1);
}

#[tokio::test]
async fn registered_users_survive_a_reload() {
    let db = make_db(None).await.unwrap();
    db.register_user(&user("bob"), "bobpassword", "bobpassword").await.unwrap();
    db.register_user(&user("ann"), "annpassword", "annpassword").await.unwrap();
    let contents = db.io.contents().unwrap();
    assert!(contents.contains("[[user]]"), "{contents}");
    assert!(
        contents.find("\"ann\"").unwrap() < contents.find("\"bob\"").unwrap(),
        "{contents}",
    );

    let reloaded = make_db(Some(&contents)).await.unwrap();
    assert!(reloaded.check_user_credentials(&user("ann"), "annpassword").await.unwrap());
    assert!(reloaded.check_user_credentials(&user("bob"), "bobpassword").await.unwrap());
}

#[tokio::test]
async fn registration_password_mismatch() {
    let db = make_db(None).await.unwrap();
    let err = db.register_user(&user("ann"), "12345678", "12345679").await.unwrap_err();
    assert!(matches!(err, RegistrationError::PasswordMismatch), "wrong error type: {err:#?}");
    assert!(!db.does_user_exist(&user("ann")).await.unwrap());
}

#[tokio::test]
async fn registration_password_too_short() {
    let db = make_db(None).await.unwrap();
    let err = db.register_user(&user("ann"), "1234567", "1234567").await.unwrap_err();
    assert!(
        matches!(err, RegistrationError::PasswordTooShort { min_length: 8 }),
        "wrong error type: {err:#?}",
    );
    assert_eq!(err.to_string(), "password must be at least 8 characters long");
    assert_eq!(db.io.writes.load(Ordering::Relaxed), 0);
}

#[tokio::test]
async fn password_length_counts_characters() {
    let db = make_db(None).await.unwrap();
    let err = db.register_user(&user("ann"), "ééééééé", "ééééééé").await.unwrap_err();
    assert!(matches!(err, RegistrationError::PasswordTooShort { .. }), "wrong error type: {err:#?}");
    db.register_user(&user("ann"), "éééééééé", "éééééééé").await.unwrap();
}

#[tokio::test]
async fn registration_username_taken() {
    let file = users_file(&[("ann", "annpassword")]);
    let db = make_db(Some(&file)).await.unwrap();
    let err = db.register_user(&user("ann"), "newpassword", "newpassword").await.unwrap_err();
    assert!(matches!(err, RegistrationError::UsernameTaken), "wrong error type: {err:#?}");
    assert!(db.check_user_credentials(&user("ann"), "annpassword").await.unwrap());
}

#[tokio::test]
async fn registration_check_order() {
    let file = users_file(&[("ann", "annpassword")]);
    let db = make_db(Some(&file)).await.unwrap();

    // a mismatch wins over everything else
    let err = db.register_user(&user("ann"), "short", "other").await.unwrap_err();
    assert!(matches!(err, RegistrationError::PasswordMismatch), "wrong error type: {err:#?}");

    // a taken username wins over a short password
    let err = db.register_user(&user("ann"), "short", "short").await.unwrap_err();
    assert!(matches!(err, RegistrationError::UsernameTaken), "wrong error type: {err:#?}");
}

#[tokio::test]
async fn failed_write_does_not_register() {
    let db = make_db(None).await.unwrap();
    db.io.fail_writes.store(true, Ordering::Relaxed);
    let err = db.register_user(&user("ann"), "12345678", "12345678").await.unwrap_err();
    assert!(
        matches!(err, RegistrationError::Db(UserDbError::Io(_))),
        "wrong error type: {err:#?}",
    );
    assert!(!db.does_user_exist(&user("ann")).await.unwrap());

    db.io.fail_writes.store(false, Ordering::Relaxed);
    db.register_user(&user("ann"), "12345678", "12345678").await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_registrations_of_one_name() {
    let db = Arc::new(make_db(None).await.unwrap());
    let tasks: Vec<_> = (0..4)
        .map(|i| {
            let db = db.clone();
            tokio::spawn(async move {
                let password = format!("password{i}");
                db.register_user(&user("ann"), &password, &password).await
            })
        })
        .collect();
    let mut successes = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(()) => successes += 1,
            Err(RegistrationError::UsernameTaken) => {},
            Err(e) => panic!("unexpected error: {e:#?}"),
        }
    }
    assert_eq!(successes, 1);
    assert_eq!(db.io.writes.load(Ordering::Relaxed), 1);
}

#[tokio::test]
async fn unknown_users_are_checked_against_a_hash() {
    let file = users_file(&[("ann", "annpassword")]);
    let db = UserDbImpl::new_internal(
        TestHasher::new(),
        TestUserDbIo::new(Some(&file)),
        8,
    ).await.unwrap();

    assert!(!db.check_user_credentials(&user("nobody"), "annpassword").await.unwrap());
    assert_eq!(db.hasher.checks.load(Ordering::Relaxed), 1);

    // the dummy password does not open anything either
    assert!(!db.check_user_credentials(&user("nobody"), DUMMY_PASSWORD).await.unwrap());
    assert!(db.check_user_credentials(&user("ann"), "annpassword").await.unwrap());
    assert_eq!(db.hasher.checks.load(Ordering::Relaxed), 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn hashing_does_not_block_lookups() {
    let db = Arc::new(
        UserDbImpl::new_internal(TestHasher::new(), TestUserDbIo::new(None), 8)
            .await.unwrap()
    );
    db.hasher.gated.store(true, Ordering::Relaxed);

    let registration = {
        let db = db.clone();
        tokio::spawn(async move {
            db.register_user(&user("ann"), "12345678", "12345678").await
        })
    };
    let hasher = db.hasher.clone();
    spawn_blocking(move || { hasher.entered.wait(); }).await.unwrap();

    // the hash is being computed right now
    let exists = timeout(Duration::from_secs(5), db.does_user_exist(&user("ann")))
        .await
        .expect("user lookup waited for the hasher")
        .unwrap();
    assert!(!exists);
    let other = timeout(Duration::from_secs(5), db.does_user_exist(&user("bob")))
        .await
        .expect("user lookup waited for the hasher")
        .unwrap();
    assert!(!other);

    let hasher = db.hasher.clone();
    spawn_blocking(move || { hasher.release.wait(); }).await.unwrap();
    registration.await.unwrap().unwrap();
    assert!(db.does_user_exist(&user("ann")).await.unwrap());
    assert_eq!(db.io.writes.load(Ordering::Relaxed), 1);
}

#[tokio::test]
async fn production_users_file() {
    let dir = TempDir::new().unwrap();
    let config = AppConfig {
        user_db: dir.child("db/users.toml").path().to_owned(),
        min_password_length: 4,
        ..Default::default()
    };
    let db = ProductionUserDb::new(&config, make_hasher()).await.unwrap();
    db.register_user(&user("ann"), "pass", "pass").await.unwrap();

    dir.child("db/users.toml").assert(predicates::str::contains("username = \"ann\""));
    assert_eq!(std::fs::read_dir(dir.child("db").path()).unwrap().count(), 1);

    let reloaded = ProductionUserDb::new(&config, make_hasher()).await.unwrap();
    assert!(reloaded.check_user_credentials(&user("ann"), "pass").await.unwrap());
}
