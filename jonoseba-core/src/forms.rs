use crate::model::{NewComplaint, NewGalleryImage, NewNewsItem};

/// The fixed list a complaint category must come from.
pub const COMPLAINT_CATEGORIES: [&str; 7] = [
    "রাস্তা ও যোগাযোগ",
    "বিদ্যুৎ",
    "পানি সরবরাহ",
    "শিক্ষা",
    "স্বাস্থ্য",
    "কৃষি",
    "অন্যান্য",
];

/// Per-field validation messages, in field order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors(pub Vec<(&'static str, String)>);

impl FieldErrors {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push((field, message.into()));
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, message)| message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Field lengths are byte lengths of the UTF-8 text.
fn length(value: &str) -> usize {
    value.len()
}

/// The public complaint form. Validation runs on submit and blocks the
/// insert until every constraint holds.
#[derive(Debug, Clone, Default)]
pub struct ComplaintForm {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub category: String,
    pub description: String,
}

impl ComplaintForm {
    /// The validated record carries no attachment; the submit handler fills
    /// that in after the upload helper has run.
    pub fn validate(&self) -> Result<NewComplaint, FieldErrors> {
        let mut errors = FieldErrors::default();

        if length(&self.name) < 2 {
            errors.push("name", "নাম অবশ্যই দিতে হবে");
        } else if length(&self.name) > 100 {
            errors.push("name", "সর্বোচ্চ 100 অক্ষর");
        }

        if length(&self.phone) < 11 {
            errors.push("phone", "সঠিক মোবাইল নম্বর দিন");
        } else if length(&self.phone) > 15 {
            errors.push("phone", "সর্বোচ্চ 15 অক্ষর");
        }

        if length(&self.address) < 5 {
            errors.push("address", "ঠিকানা অবশ্যই দিতে হবে");
        } else if length(&self.address) > 500 {
            errors.push("address", "সর্বোচ্চ 500 অক্ষর");
        }

        if self.category.is_empty() || !COMPLAINT_CATEGORIES.contains(&self.category.as_str()) {
            errors.push("category", "বিভাগ নির্বাচন করুন");
        }

        if length(&self.description) < 10 {
            errors.push("description", "বিস্তারিত বিবরণ দিন");
        } else if length(&self.description) > 2000 {
            errors.push("description", "সর্বোচ্চ 2000 অক্ষর");
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(NewComplaint {
            name: self.name.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            category: self.category.clone(),
            description: self.description.clone(),
            attachment_url: None,
        })
    }
}

/// Admin "add news" form; only the title is required.
#[derive(Debug, Clone, Default)]
pub struct NewsForm {
    pub title: String,
    pub description: String,
}

impl NewsForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        if self.title.trim().is_empty() {
            errors.push("title", "শিরোনাম অবশ্যই দিতে হবে");
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    pub fn to_record(&self, image_url: Option<String>) -> NewNewsItem {
        NewNewsItem {
            title: self.title.clone(),
            description: self.description.clone(),
            image_url,
        }
    }
}

/// Admin "add gallery image" form; the file itself is mandatory, the
/// caption is not.
#[derive(Debug, Clone, Default)]
pub struct GalleryForm {
    pub caption: String,
}

impl GalleryForm {
    pub fn validate(&self, has_file: bool) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        if !has_file {
            errors.push("file", "ছবি নির্বাচন করুন");
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    pub fn to_record(&self, image_url: String) -> NewGalleryImage {
        let caption = self.caption.trim();
        NewGalleryImage {
            image_url,
            caption: if caption.is_empty() {
                None
            } else {
                Some(caption.to_string())
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> ComplaintForm {
        ComplaintForm {
            name: "রহিম".to_string(),
            phone: "01712345678".to_string(),
            address: "ঢাকা, বাংলাদেশ".to_string(),
            category: "বিদ্যুৎ".to_string(),
            description: "দশ অক্ষরের বেশি বিবরণ".to_string(),
        }
    }

    #[test]
    fn accepts_a_valid_complaint() {
        let record = valid_form().validate().unwrap();
        assert_eq!(record.category, "বিদ্যুৎ");
        assert_eq!(record.attachment_url, None);
    }

    #[test]
    fn description_boundary_is_length_ten() {
        let mut form = valid_form();
        form.description = "x".repeat(9);
        let errors = form.validate().unwrap_err();
        assert!(errors.get("description").is_some());

        form.description = "x".repeat(10);
        assert!(form.validate().is_ok());
    }

    #[test]
    fn short_bengali_address_still_clears_the_minimum() {
        // Multi-byte text: four letters but well past five bytes.
        let mut form = valid_form();
        form.address = "ঢাকা".to_string();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn phone_boundary_is_eleven_characters() {
        let mut form = valid_form();
        form.phone = "0".repeat(10);
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("phone"), Some("সঠিক মোবাইল নম্বর দিন"));

        form.phone = "0".repeat(11);
        assert!(form.validate().is_ok());
    }

    #[test]
    fn category_must_come_from_the_fixed_list() {
        let mut form = valid_form();
        form.category = String::new();
        assert!(form.validate().unwrap_err().get("category").is_some());

        form.category = "আবহাওয়া".to_string();
        assert!(form.validate().unwrap_err().get("category").is_some());
    }

    #[test]
    fn collects_every_failing_field_at_once() {
        let form = ComplaintForm::default();
        let errors = form.validate().unwrap_err();
        for field in ["name", "phone", "address", "category", "description"] {
            assert!(errors.get(field).is_some(), "missing error for {field}");
        }
    }

    #[test]
    fn news_needs_a_title() {
        let form = NewsForm::default();
        assert!(form.validate().is_err());

        let form = NewsForm {
            title: "উন্নয়ন প্রকল্প".to_string(),
            description: String::new(),
        };
        assert!(form.validate().is_ok());
        assert_eq!(form.to_record(None).image_url, None);
    }

    #[test]
    fn gallery_caption_is_optional_but_file_is_not() {
        let form = GalleryForm::default();
        assert!(form.validate(false).is_err());
        assert!(form.validate(true).is_ok());

        let record = form.to_record("https://cdn.test/a.jpg".to_string());
        assert_eq!(record.caption, None);
    }
}
