mod normalization_plan_test;
mod task_options_test;
