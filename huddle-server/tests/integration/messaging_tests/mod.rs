mod test_relay_missing_target;
