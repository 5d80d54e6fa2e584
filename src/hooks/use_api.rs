use crate::services::api::FundApiClient;
use std::rc::Rc;
use yew::prelude::*;

/// The backend client shared through a Yew context.
#[derive(Clone, Debug)]
pub struct ApiContext(pub Rc<FundApiClient>);

impl ApiContext {
    pub fn new(client: FundApiClient) -> Self {
        Self(Rc::new(client))
    }
}

impl PartialEq for ApiContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Client from the nearest `ContextProvider<ApiContext>`, if any.
#[hook]
pub fn use_api() -> Option<Rc<FundApiClient>> {
    use_context::<ApiContext>().map(|ctx| ctx.0)
}
