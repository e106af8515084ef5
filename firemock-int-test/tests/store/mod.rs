mod batch_get_test;
mod commit_test;
mod get_test;
mod load_test;
mod multi_threaded_test;
mod query_test;
