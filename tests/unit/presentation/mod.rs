mod test_market;
