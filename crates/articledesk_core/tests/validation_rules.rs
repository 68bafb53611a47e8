use articledesk_core::validation::{is_valid_email, validate_form, Field, FormInput, Rule};
use articledesk_core::{
    Article, ArticleFields, ArticleForm, ArticleId, Category, FileAttachment, FormKind,
    SignInForm, SignUpForm, ValidationError, MAX_ATTACHMENT_BYTES,
};
use chrono::NaiveDate;

fn sign_up(full_name: &str, email: &str, password: &str, confirm: &str) -> SignUpForm {
    SignUpForm {
        full_name: full_name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        confirm_password: confirm.to_string(),
    }
}

#[test]
fn email_shape_examples() {
    assert!(is_valid_email("a@b.c"));
    assert!(!is_valid_email("a@b"));
    assert!(!is_valid_email("ab.c"));
    assert!(!is_valid_email(""));
}

#[test]
fn sign_up_password_length_boundary() {
    let short = sign_up("Ada", "a@b.c", "abcde", "abcde");
    assert_eq!(short.validate(), Err(ValidationError::PasswordTooShort));

    let ok = sign_up("Ada", "a@b.c", "abcdef", "abcdef");
    assert_eq!(ok.validate(), Ok(()));
}

#[test]
fn sign_up_reports_first_failing_rule() {
    assert_eq!(
        sign_up("", "a@b.c", "secret1", "secret1").validate(),
        Err(ValidationError::MissingFields)
    );
    assert_eq!(
        sign_up(" A ", "not-an-email", "x", "y").validate(),
        Err(ValidationError::FullNameTooShort)
    );
    assert_eq!(
        sign_up("Ada", "not-an-email", "x", "y").validate(),
        Err(ValidationError::InvalidEmail)
    );
    assert_eq!(
        sign_up("Ada", "a@b.c", "secret1", "secret2").validate(),
        Err(ValidationError::PasswordMismatch)
    );
    assert_eq!(
        ValidationError::PasswordMismatch.to_string(),
        "Passwords do not match"
    );
}

#[test]
fn sign_in_requires_fields_then_email_shape() {
    let blank = SignInForm {
        email: "  ".to_string(),
        password: "pw".to_string(),
    };
    assert_eq!(blank.validate(), Err(ValidationError::MissingFields));
    assert_eq!(
        ValidationError::MissingFields.to_string(),
        "Please fill in all fields"
    );

    let bad_email = SignInForm {
        email: "a@b".to_string(),
        password: "pw".to_string(),
    };
    assert_eq!(bad_email.validate(), Err(ValidationError::InvalidEmail));

    let ok = SignInForm {
        email: "a@b.c".to_string(),
        password: "pw".to_string(),
    };
    assert_eq!(ok.validate(), Ok(()));
}

#[test]
fn article_form_requires_title_author_content() {
    let mut form = ArticleForm::new();
    form.title = "T".to_string();
    form.content = "C".to_string();

    let err = form.to_fields(FormKind::CreateArticle).unwrap_err();
    assert_eq!(err, ValidationError::MissingRequiredFields);
    assert_eq!(err.to_string(), "Please fill in all required fields");

    form.author = "A".to_string();
    let fields = form.to_fields(FormKind::CreateArticle).unwrap();
    assert_eq!(fields.title, "T");
    assert_eq!(fields.category, None);
    assert_eq!(fields.attachment, None);
}

#[test]
fn article_form_parses_category_and_date() {
    let mut form = ArticleForm::new();
    form.title = "T".to_string();
    form.author = "A".to_string();
    form.content = "C".to_string();
    form.category = "Education".to_string();
    form.date = "2023-12-31".to_string();

    let fields = form.to_fields(FormKind::UpdateArticle).unwrap();
    assert_eq!(fields.category, Some(Category::Education));
    assert_eq!(fields.date, NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());

    form.category = "Gossip".to_string();
    assert_eq!(
        form.to_fields(FormKind::UpdateArticle),
        Err(ValidationError::InvalidCategory("Gossip".to_string()))
    );

    form.category.clear();
    form.date = "31.12.2023".to_string();
    assert!(matches!(
        form.to_fields(FormKind::UpdateArticle),
        Err(ValidationError::InvalidDate(_))
    ));
}

#[test]
fn attachment_limit_is_inclusive_at_ten_mebibytes() {
    let mut form = ArticleForm::new();
    form.attach_file(FileAttachment {
        name: "exact.bin".to_string(),
        size: MAX_ATTACHMENT_BYTES,
    })
    .unwrap();

    let err = form
        .attach_file(FileAttachment {
            name: "over.bin".to_string(),
            size: MAX_ATTACHMENT_BYTES + 1,
        })
        .unwrap_err();
    assert_eq!(err.to_string(), "File size must be less than 10MB");
    assert_eq!(form.attachment().unwrap().name, "exact.bin");
}

#[test]
fn edit_form_keeps_stored_file_and_refuses_new_ones() {
    let mut stored_fields = ArticleFields::new("T", "A", "C");
    stored_fields.attachment = Some(FileAttachment {
        name: "orig.pdf".to_string(),
        size: 1024,
    });
    let stored = Article::from_fields(ArticleId::from("42"), stored_fields);

    let mut form = ArticleForm::from_article(&stored);
    assert_eq!(form.kind(), FormKind::UpdateArticle);
    assert_eq!(ArticleForm::new().kind(), FormKind::CreateArticle);

    let err = form
        .attach_file(FileAttachment {
            name: "swap.pdf".to_string(),
            size: 10,
        })
        .unwrap_err();
    assert_eq!(err, ValidationError::AttachmentOnCreateOnly);
    assert_eq!(
        form.to_fields(FormKind::UpdateArticle).unwrap().attachment,
        stored.attachment()
    );
}

#[test]
fn edit_form_of_undated_record_defaults_to_today() {
    let mut stored = Article::from_fields(ArticleId::from("7"), ArticleFields::new("T", "A", "C"));
    stored.date = None;

    let form = ArticleForm::from_article(&stored);
    assert_eq!(form.date, "");
    assert_eq!(
        form.to_fields(FormKind::UpdateArticle).unwrap().date,
        articledesk_core::model::article::today()
    );
}

#[test]
fn rule_tables_are_selected_by_form_kind() {
    assert_eq!(FormKind::CreateArticle.rules(), FormKind::UpdateArticle.rules());
    assert!(matches!(
        FormKind::SignUp.rules().first(),
        Some(Rule::Required(fields)) if fields.contains(&Field::ConfirmPassword)
    ));
    assert!(!FormKind::SignIn
        .rules()
        .contains(&Rule::PasswordLength));
}

struct OnlyEmail(&'static str);

impl FormInput for OnlyEmail {
    fn value(&self, field: Field) -> &str {
        match field {
            Field::Email => self.0,
            _ => "",
        }
    }
}

#[test]
fn validate_form_accepts_any_form_input() {
    assert_eq!(
        validate_form(FormKind::SignIn, &OnlyEmail("a@b.c")),
        Err(ValidationError::MissingFields)
    );
}
