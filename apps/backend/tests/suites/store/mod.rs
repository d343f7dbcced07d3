mod postgres;
mod search_props;
