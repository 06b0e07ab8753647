use crate::shared::api_utils::{fetch_by_id, upsert};
use crate::shared::form_utils::{join_list, opt_string, split_list};
use contracts::domain::a002_attribute::aggregate::{Attribute, AttributeDataType, AttributeDto};
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct AttributeDetailsVm {
    pub id: RwSignal<Option<String>>,
    pub code: RwSignal<String>,
    pub description: RwSignal<String>,
    pub comment: RwSignal<String>,
    /// `AttributeDataType::as_str`
    pub data_type: RwSignal<String>,
    pub unit: RwSignal<String>,
    /// Варианты, по одному в строке
    pub options: RwSignal<String>,
    pub is_filterable: RwSignal<bool>,

    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl AttributeDetailsVm {
    pub fn new() -> Self {
        Self {
            id: RwSignal::new(None),
            code: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            comment: RwSignal::new(String::new()),
            data_type: RwSignal::new(AttributeDataType::Text.as_str().to_string()),
            unit: RwSignal::new(String::new()),
            options: RwSignal::new(String::new()),
            is_filterable: RwSignal::new(false),
            loading: RwSignal::new(false),
            saving: RwSignal::new(false),
            error: RwSignal::new(None),
        }
    }

    pub fn is_choice(&self) -> Signal<bool> {
        let data_type = self.data_type;
        Signal::derive(move || data_type.get() == AttributeDataType::Choice.as_str())
    }

    pub fn is_save_disabled(&self) -> Signal<bool> {
        let (saving, description) = (self.saving, self.description);
        Signal::derive(move || saving.get() || description.get().trim().is_empty())
    }

    pub fn load(&self, id: String) {
        let this = *self;
        this.loading.set(true);
        this.id.set(Some(id.clone()));
        leptos::task::spawn_local(async move {
            match fetch_by_id::<Attribute>(Attribute::collection_name(), &id).await {
                Ok(item) => this.from_aggregate(&item),
                Err(e) => this.error.set(Some(e)),
            }
            this.loading.set(false);
        });
    }

    pub fn save(&self, on_saved: Callback<()>) {
        let dto = match self.to_dto() {
            Ok(dto) => dto,
            Err(msg) => {
                self.error.set(Some(msg));
                return;
            }
        };

        let this = *self;
        this.saving.set(true);
        this.error.set(None);

        leptos::task::spawn_local(async move {
            match upsert(Attribute::collection_name(), &dto).await {
                Ok(new_id) => {
                    this.id.set(Some(new_id));
                    this.saving.set(false);
                    on_saved.run(());
                }
                Err(e) => {
                    this.saving.set(false);
                    this.error.set(Some(e));
                }
            }
        });
    }

    fn from_aggregate(&self, a: &Attribute) {
        self.code.set(a.base.code.clone());
        self.description.set(a.base.description.clone());
        self.comment.set(a.base.comment.clone().unwrap_or_default());
        self.data_type.set(a.data_type.as_str().to_string());
        self.unit.set(a.unit.clone().unwrap_or_default());
        self.options.set(join_list(&a.options));
        self.is_filterable.set(a.is_filterable);
    }

    fn to_dto(&self) -> Result<AttributeDto, String> {
        let description = self.description.get_untracked().trim().to_string();
        if description.is_empty() {
            return Err("Attribute name is required".into());
        }
        let data_type = AttributeDataType::parse(&self.data_type.get_untracked())
            .ok_or_else(|| "Unknown data type".to_string())?;
        let options = if data_type == AttributeDataType::Choice {
            split_list(&self.options.get_untracked())
        } else {
            Vec::new()
        };
        if data_type == AttributeDataType::Choice && options.is_empty() {
            return Err("A choice attribute needs at least one option".into());
        }

        Ok(AttributeDto {
            id: self.id.get_untracked(),
            code: opt_string(&self.code.get_untracked()),
            description,
            comment: opt_string(&self.comment.get_untracked()),
            data_type,
            unit: opt_string(&self.unit.get_untracked()),
            options,
            is_filterable: self.is_filterable.get_untracked(),
        })
    }
}
